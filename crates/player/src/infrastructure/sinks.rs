//! Form sinks - where submitted answers end up

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use formwalk_domain::FormValues;

use crate::ports::outbound::{FormSinkPort, SubmitError};
use crate::session_types::FormSubmission;

/// Logs the completed answers and accepts every submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFormSink;

#[async_trait]
impl FormSinkPort for LogFormSink {
    async fn submit(&self, submission: FormSubmission) -> Result<(), SubmitError> {
        let values = serde_json::to_string(&submission.values.to_record())
            .map_err(|e| SubmitError::Io(e.to_string()))?;
        tracing::info!(
            session_key = %submission.session_key,
            form_title = %submission.form_title,
            values = %values,
            "Form submitted"
        );
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionEnvelope<'a> {
    form_title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    form_id: Option<&'a str>,
    submitted_at: DateTime<Utc>,
    values: &'a FormValues,
}

/// Writes one JSON line per submission to `W`.
pub struct JsonWriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonWriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self, submission: &FormSubmission, submitted_at: DateTime<Utc>) -> io::Result<()> {
        let envelope = SubmissionEnvelope {
            form_title: &submission.form_title,
            form_id: submission.form_id.as_deref(),
            submitted_at,
            values: &submission.values,
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("submission writer poisoned"))?;
        serde_json::to_writer(&mut *writer, &envelope)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}

impl JsonWriterSink<File> {
    /// Append submissions to the file at `path`, creating it if needed.
    pub fn append_to_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

#[async_trait]
impl<W: Write + Send> FormSinkPort for JsonWriterSink<W> {
    async fn submit(&self, submission: FormSubmission) -> Result<(), SubmitError> {
        self.write(&submission, Utc::now())
            .map_err(|e| SubmitError::Io(e.to_string()))?;
        tracing::info!(form_title = %submission.form_title, "Submission written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_types::SessionKey;
    use formwalk_domain::FieldId;

    fn submission() -> FormSubmission {
        let mut values = FormValues::new();
        values.set(FieldId::new("name").unwrap(), "Ann");
        values.set(FieldId::new("colors").unwrap(), "red,blue");
        FormSubmission {
            session_key: SessionKey::new("RA001").unwrap(),
            form_title: "Registration".into(),
            form_id: None,
            values,
        }
    }

    #[tokio::test]
    async fn writes_one_envelope_per_line() {
        let sink = JsonWriterSink::new(Vec::new());
        sink.submit(submission()).await.unwrap();
        sink.submit(submission()).await.unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let json: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(json["formTitle"], "Registration");
        assert_eq!(json["values"]["name"], "Ann");
        assert_eq!(json["values"]["colors"], "red,blue");
        assert!(json["submittedAt"].is_string());
        assert!(json.get("formId").is_none());
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn write_failure_is_a_submit_error() {
        let sink = JsonWriterSink::new(BrokenWriter);
        assert!(matches!(
            sink.submit(submission()).await,
            Err(SubmitError::Io(_))
        ));
    }

    #[tokio::test]
    async fn log_sink_accepts_everything() {
        assert_eq!(LogFormSink.submit(submission()).await, Ok(()));
    }
}
