use chrono::Local;
use concierge_core::ConversationObserver;
use concierge_core::ConversationSnapshot;
use concierge_core::Message;
use concierge_core::Role;
use owo_colors::OwoColorize;
use owo_colors::Style;

use crate::output::PrintedUpTo;
use crate::output::TranscriptOutput;
use crate::output::print_stderr_line;
use crate::output::print_stdout_line;

/// Transcript for people: `[HH:MM] Concierge: ...` lines on stdout, the
/// typing indicator and notices on stderr.
pub(crate) struct HumanOutput {
    printed: PrintedUpTo,
    with_ansi: bool,
    dimmed: Style,
    bold: Style,
    user: Style,
    assistant: Style,
    italic: Style,
}

impl HumanOutput {
    pub(crate) fn create_with_ansi(with_ansi: bool) -> Self {
        Self {
            printed: PrintedUpTo::default(),
            with_ansi,
            dimmed: Style::new().dimmed(),
            bold: Style::new().bold(),
            user: Style::new().cyan().bold(),
            assistant: Style::new().green().bold(),
            italic: Style::new().italic(),
        }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.with_ansi {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn render_message(&self, message: &Message) -> String {
        let time = message
            .created_at()
            .with_timezone(&Local)
            .format("[%H:%M]")
            .to_string();
        let (label, style) = match message.role() {
            Role::User => ("You:", self.user),
            Role::Assistant => ("Concierge:", self.assistant),
        };
        format!(
            "{} {} {}",
            self.paint(&time, self.dimmed),
            self.paint(label, style),
            message.content()
        )
    }

    fn render_suggestions(&self, suggested_prompts: &[String]) -> Vec<String> {
        if suggested_prompts.is_empty() {
            return Vec::new();
        }
        let mut lines = vec![self.paint("Quick questions:", self.bold)];
        lines.extend(suggested_prompts.iter().enumerate().map(|(i, prompt)| {
            let command = format!("/{}", i + 1);
            format!("  {} {prompt}", self.paint(&command, self.dimmed))
        }));
        lines.push(self.paint(
            "Type a message, /N to ask a quick question, or /quit to leave.",
            self.dimmed,
        ));
        lines
    }

    fn render_update(&self, snapshot: &ConversationSnapshot) -> Vec<String> {
        self.printed
            .take_unseen(snapshot)
            .iter()
            .map(|message| self.render_message(message))
            .collect()
    }
}

impl ConversationObserver for HumanOutput {
    fn on_update(&self, snapshot: &ConversationSnapshot) {
        for line in self.render_update(snapshot) {
            print_stdout_line(&line);
        }
        if snapshot.busy {
            print_stderr_line(&self.paint("Concierge is typing...", self.italic));
        }
    }
}

impl TranscriptOutput for HumanOutput {
    fn session_started(&self, snapshot: &ConversationSnapshot, suggested_prompts: &[String]) {
        self.on_update(snapshot);
        for line in self.render_suggestions(suggested_prompts) {
            print_stdout_line(&line);
        }
    }

    fn notice(&self, text: &str) {
        print_stderr_line(&self.paint(text, self.dimmed));
    }
}
