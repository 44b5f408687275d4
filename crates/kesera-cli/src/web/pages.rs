use kesera_core::record::StudentRecord;
use kesera_core::render;
use maud::{html, Markup, DOCTYPE};

pub fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                main { (content) }
            }
        }
    }
}

/// Lookup form. With a default student configured both fields may be left blank.
pub fn index(has_defaults: bool) -> Markup {
    layout(
        "Student result",
        html! {
            h1 { "Student result" }
            form action="/result" method="get" {
                p {
                    label for="registration_number" { "Registration number" }
                    input type="text" id="registration_number" name="registration_number" required[!has_defaults];
                }
                p {
                    label for="first_name" { "First name" }
                    input type="text" id="first_name" name="first_name" required[!has_defaults];
                }
                button type="submit" { "Look up" }
            }
        },
    )
}

pub fn student(record: &StudentRecord, photo_src: Option<&str>) -> Markup {
    layout(
        "Student result",
        html! {
            h1 { "Student Information" }
            @if let Some(src) = photo_src {
                img src=(src) alt="Student photo" width="160";
            }
            table {
                @for (label, value) in record.details() {
                    tr {
                        th { (label) }
                        td { (value) }
                    }
                }
            }
            @if record.courses.is_empty() {
                p { (render::NO_COURSES) }
            } @else {
                h2 { "Courses" }
                ul {
                    @for course in &record.courses {
                        li { (course.display_name()) }
                    }
                }
            }
            p { a href="/" { "New lookup" } }
        },
    )
}

pub fn message(text: &str) -> Markup {
    layout(
        "Student result",
        html! {
            p { (text) }
            p { a href="/" { "New lookup" } }
        },
    )
}
