use std::io::Write;

use contacts::error::ErrorInfo;
use contacts::model::{CallRecord, Contact};
use contacts::ContactsView;
use parking_lot::Mutex;
use tracing::warn;

/// Text rendering of the contacts screen.
///
/// Remembers the last list it showed so the demo session can "press" an entry.
pub struct ConsoleView<W> {
    out: Mutex<W>,
    displayed: Mutex<Vec<Contact>>,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            displayed: Mutex::new(Vec::new()),
        }
    }

    pub fn displayed(&self) -> Vec<Contact> {
        self.displayed.lock().clone()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn emit(&self, text: &str) {
        let mut out = self.out.lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!(error = %e, "console write failed");
        }
    }
}

impl<W: Write + Send> ContactsView for ConsoleView<W> {
    fn show_contacts(&self, contacts: &[Contact]) {
        *self.displayed.lock() = contacts.to_vec();

        let mut text = format!("Contacts ({}):\n", contacts.len());
        for (i, c) in contacts.iter().enumerate() {
            text.push_str(&format!("  {}. {}\n", i + 1, c));
        }
        self.emit(&text);
    }

    fn show_error(&self, error: &ErrorInfo) {
        self.emit(&format!("error: {error}\n"));
    }

    fn show_progress(&self) {
        self.emit("loading...\n");
    }

    fn hide_progress(&self) {}

    fn show_call_history(&self, records: &[CallRecord]) {
        let mut text = format!("Call history ({}):\n", records.len());
        for r in records {
            text.push_str(&format!(
                "  {} -> {} ({})\n",
                r.placed_at.format("%Y-%m-%d %H:%M:%S"),
                r.phone,
                r.contact_id
            ));
        }
        self.emit(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contacts::error::RepositoryError;

    #[test]
    fn renders_list_and_remembers_it() {
        let view = ConsoleView::new(Vec::new());
        let list = vec![
            Contact::new("1", "Ada", "Lovelace", "+1"),
            Contact::new("2", "Grace", "", "+2"),
        ];

        view.show_progress();
        view.show_contacts(&list);
        view.hide_progress();
        view.show_error(&ErrorInfo::from(RepositoryError::storage("down")));

        assert_eq!(view.displayed(), list);
        let text = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(
            text,
            "loading...\nContacts (2):\n  1. Ada Lovelace <+1>\n  2. Grace <+2>\nerror: Storage error: down\n"
        );
    }

    #[test]
    fn renders_call_history() {
        let view = ConsoleView::new(Vec::new());
        let record = CallRecord::outgoing(&Contact::new("r1", "Ada", "Lovelace", "+1"));

        view.show_call_history(&[record]);

        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.starts_with("Call history (1):\n"));
        assert!(text.contains("-> +1 (r1)"));
    }
}
