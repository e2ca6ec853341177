use std::fmt;

use crate::console::panel::Phase;
use crate::console::shell::{Route, Shell};

const MASK: char = '*';

/// Text rendering of the navigation bar and the active panel.
pub fn render(shell: &Shell) -> String {
    ShellView(shell).to_string()
}

struct ShellView<'a>(&'a Shell);

impl fmt::Display for ShellView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shell = self.0;
        let panel = shell.panel();

        let nav: Vec<String> = Route::ALL
            .iter()
            .map(|&route| {
                if route == shell.route() {
                    format!("[{}]", route.label())
                } else {
                    format!(" {} ", route.label())
                }
            })
            .collect();
        writeln!(f, "{}", nav.join(" | "))?;
        writeln!(f, "== {} ==", shell.route().label())?;

        for field in panel.form().fields() {
            let value = panel.form().value(field);
            if field.is_secret() {
                let masked: String = value.chars().map(|_| MASK).collect();
                writeln!(f, "{}: {}", field.label(), masked)?;
            } else {
                writeln!(f, "{}: {}", field.label(), value)?;
            }
        }

        if let Phase::Submitting(_) = panel.phase() {
            writeln!(f, "(working...)")?;
        }

        if let Some(record) = panel.fetched() {
            writeln!(f, "-- User Details --")?;
            writeln!(f, "Username: {}", record.username)?;
            writeln!(f, "Password: {}", record.password)?;
        }

        let feedback = panel.feedback();
        if feedback.is_visible() {
            writeln!(f, "[{}] {}", feedback.severity(), feedback.message())?;
        }
        Ok(())
    }
}
