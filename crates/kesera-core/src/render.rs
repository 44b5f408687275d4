//! Plain-text rendering shared by the console and chat adapters.

use std::fmt::Write;

use crate::fetcher::FetchError;
use crate::record::StudentRecord;
use crate::source::Lookup;

pub const NO_STUDENT_DATA: &str = "No student data found.";
pub const GENERIC_FAILURE: &str = "No data found or an error occurred.";
pub const TRY_AGAIN_LATER: &str = "Request failed, please try again later.";
pub const NO_COURSES: &str = "No courses found.";

/// Student details followed by the course list.
pub fn console(record: &StudentRecord) -> String {
    let mut out = String::from("Student Information:\n");
    for (label, value) in record.details() {
        let _ = writeln!(out, "{label}: {value}");
    }
    out.push('\n');
    if record.courses.is_empty() {
        out.push_str(NO_COURSES);
        out.push('\n');
    } else {
        out.push_str("Courses:\n");
        for course in &record.courses {
            let _ = writeln!(out, "- {}", course.display_name());
        }
    }
    out
}

/// User-facing text for a failed query. Raw bodies and causes stay in the logs.
pub fn failure_message(error: &FetchError) -> &'static str {
    if error.is_transient() {
        TRY_AGAIN_LATER
    } else {
        GENERIC_FAILURE
    }
}

/// Text for any lookup outcome.
pub fn outcome_text(outcome: &Result<Lookup, FetchError>) -> String {
    match outcome {
        Ok(Lookup::Found(record)) => console(record),
        Ok(Lookup::NoStudentData) => NO_STUDENT_DATA.to_string(),
        Err(e) => failure_message(e).to_string(),
    }
}
