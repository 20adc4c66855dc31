use backdrop_capture::{CaptureError, CaptureStore};

/// Outcome of the last submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Accepted,
    Rejected,
}

impl FormStatus {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Accepted => "Thanks! We will notify you when the site is live.",
            Self::Rejected => "Please enter a valid email address.",
        }
    }
}

/// Notify form state: the input field and the last status message.
///
/// Submission validates through the capture store; the store keeps the
/// growing record list, the form only mirrors the outcome.
#[derive(Debug, Default)]
pub struct NotifyForm {
    pub input: String,
    status: Option<FormStatus>,
}

impl NotifyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<FormStatus> {
        self.status
    }

    /// Intercept a submit: on acceptance the input clears; on rejection it
    /// is left for the user to correct. Store write failures never surface
    /// here — the record is accepted regardless.
    pub fn submit(&mut self, store: &mut CaptureStore) -> FormStatus {
        let status = match store.submit(&self.input) {
            Ok(_) => {
                self.input.clear();
                FormStatus::Accepted
            }
            Err(CaptureError::InvalidEmail(_)) => FormStatus::Rejected,
            // Store construction is the only source of other variants;
            // submission itself swallows backup failures.
            Err(_) => FormStatus::Rejected,
        };
        self.status = Some(status);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, CaptureStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = CaptureStore::open(tmp.path()).unwrap();
        (tmp, store)
    }

    #[test]
    fn rejects_invalid_email_and_keeps_input() {
        let (_tmp, mut store) = store();
        let mut form = NotifyForm::new();
        form.input = "not-an-email".into();

        let status = form.submit(&mut store);
        assert_eq!(status, FormStatus::Rejected);
        assert_eq!(form.input, "not-an-email");
        assert_eq!(form.status().unwrap().message(), "Please enter a valid email address.");
        assert!(store.is_empty());
    }

    #[test]
    fn accepts_valid_email_and_clears_input() {
        let (_tmp, mut store) = store();
        let mut form = NotifyForm::new();
        form.input = "user@example.com".into();

        let status = form.submit(&mut store);
        assert_eq!(status, FormStatus::Accepted);
        assert!(form.input.is_empty());
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].email, "user@example.com");
        assert!(store.records()[0].ts > 0);
    }

    #[test]
    fn repeat_submissions_grow_the_list() {
        let (_tmp, mut store) = store();
        let mut form = NotifyForm::new();
        form.input = "user@example.com".into();
        form.submit(&mut store);
        form.input = "user@example.com".into();
        form.submit(&mut store);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn empty_input_rejected() {
        let (_tmp, mut store) = store();
        let mut form = NotifyForm::new();
        assert_eq!(form.submit(&mut store), FormStatus::Rejected);
        assert!(store.is_empty());
    }
}
