//! Canned result source shared by adapter tests.

use std::sync::Mutex;

use kesera_core::fetcher::{FetchError, FetchRequest};
use kesera_core::record::{Course, StudentRecord};
use kesera_core::source::{Lookup, ResultSource};

/// "123456" is a known student, "666" is a student whose photo is a script URL,
/// "403" answers Forbidden, anything else has no data.
#[derive(Default)]
pub struct CannedSource {
    pub seen: Mutex<Vec<FetchRequest>>,
}

impl ResultSource for CannedSource {
    fn lookup(&self, request: &FetchRequest) -> Result<Lookup, FetchError> {
        self.seen.lock().unwrap().push(request.clone());
        match request.registration_number() {
            "123456" => Ok(Lookup::Found(StudentRecord {
                name: Some(request.first_name().to_string()),
                age: Some("18".into()),
                school: Some("Addis Ketema <Secondary>".into()),
                photo: Some("/photos/123456.jpg".into()),
                courses: vec![
                    Course {
                        name: Some("Mathematics".into()),
                    },
                    Course {
                        name: Some("Physics".into()),
                    },
                ],
                ..StudentRecord::default()
            })),
            "666" => Ok(Lookup::Found(StudentRecord {
                name: Some(request.first_name().to_string()),
                photo: Some("javascript:alert(document.cookie)".into()),
                ..StudentRecord::default()
            })),
            "403" => Err(FetchError::HttpError {
                status: 403,
                body: "<h1>Forbidden by upstream</h1>".into(),
            }),
            _ => Ok(Lookup::NoStudentData),
        }
    }
}
