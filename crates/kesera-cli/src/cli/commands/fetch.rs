//! `kesera fetch <registration number> <first name>` – print one result.

use anyhow::{Context, Result};
use kesera_core::config::KeseraConfig;
use kesera_core::fetcher::{FetchRequest, ResultFetcher};
use kesera_core::photo::{self, Photo};
use kesera_core::render;
use kesera_core::source::Lookup;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct FetchOptions {
    pub json: bool,
    pub save_photo: Option<PathBuf>,
    pub show_photo: bool,
}

impl FetchOptions {
    fn wants_photo(&self) -> bool {
        self.save_photo.is_some() || self.show_photo
    }
}

pub async fn run_fetch(cfg: &KeseraConfig, request: FetchRequest, opts: FetchOptions) -> Result<()> {
    let fetcher = ResultFetcher::new(cfg)?;
    tokio::task::spawn_blocking(move || fetch_and_print(&fetcher, &request, &opts))
        .await
        .context("fetch task join")?
}

/// Fetch failures end up as a printed message, not as an error.
fn fetch_and_print(fetcher: &ResultFetcher, request: &FetchRequest, opts: &FetchOptions) -> Result<()> {
    let value = match fetcher.fetch(request) {
        Ok(value) => value,
        Err(e) => {
            println!("{}", render::failure_message(&e));
            return Ok(());
        }
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match Lookup::from_response(&value) {
        Lookup::NoStudentData => println!("{}", render::NO_STUDENT_DATA),
        Lookup::Found(record) => {
            if let Some(reference) = record.photo.as_deref().filter(|_| opts.wants_photo()) {
                match photo::load(fetcher, reference) {
                    Ok(photo) => handle_photo(&photo, opts),
                    Err(e) => {
                        tracing::warn!("photo download failed: {:#}", e);
                        println!("Failed to download the photo: {e}");
                    }
                }
            }
            println!();
            print!("{}", render::console(&record));
        }
    }
    Ok(())
}

fn handle_photo(photo: &Photo, opts: &FetchOptions) {
    if let Some(path) = &opts.save_photo {
        match save_photo(photo, path) {
            Ok(()) => println!("Photo saved to {}", path.display()),
            Err(e) => println!("Failed to save the photo: {e:#}"),
        }
    }
    if opts.show_photo {
        if let Err(e) = show_photo(photo) {
            tracing::warn!("photo viewer failed: {:#}", e);
            println!("Failed to open the image file.");
        }
    }
}

fn save_photo(photo: &Photo, path: &Path) -> Result<()> {
    std::fs::write(path, &photo.bytes).with_context(|| format!("write photo: {}", path.display()))
}

/// Writes the photo to a kept temp file and hands it to `xdg-open`.
fn show_photo(photo: &Photo) -> Result<()> {
    let file = tempfile::Builder::new()
        .prefix("kesera-photo-")
        .suffix(&format!(".{}", photo.extension))
        .tempfile()
        .context("create temp file for photo")?;
    std::fs::write(file.path(), &photo.bytes).context("write temp photo")?;
    // The viewer outlives this process, so the file must too.
    let (_, path) = file.keep().context("keep temp photo")?;
    std::process::Command::new("xdg-open")
        .arg(&path)
        .spawn()
        .context("launch xdg-open")?;
    tracing::debug!(path = %path.display(), "photo opened");
    Ok(())
}
