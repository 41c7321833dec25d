/// Terminal collaborators
///
/// Implementations of the notifier, renderer and confirmation prompt that
/// talk to a terminal. Each one writes to any `Write` so they can be
/// pointed at a buffer.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use crate::display;
use crate::state::collaborators::{Confirmer, Notifier, Renderer, Severity};
use crate::state::data::{PhotoDetails, PhotoRecord};

/// Prints notifications, one per line.
pub struct ConsoleNotifier<W: Write> {
    out: RefCell<W>,
}

impl ConsoleNotifier<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out: RefCell::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn notify(&self, message: &str, severity: Severity) {
        let icon = match severity {
            Severity::Success => "✅",
            Severity::Error => "❌",
        };
        // A closed terminal is not worth failing an operation over
        let _ = writeln!(self.out.borrow_mut(), "{} {}", icon, message);
    }
}

/// Prints the photo grid as a table and the detail view as a block.
pub struct ConsoleRenderer<W: Write> {
    out: RefCell<W>,
    /// Only the `list` command wants the grid printed
    show_grid: bool,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout(show_grid: bool) -> Self {
        Self::new(io::stdout(), show_grid)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, show_grid: bool) -> Self {
        Self {
            out: RefCell::new(out),
            show_grid,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&self, photos: &[PhotoRecord]) {
        if !self.show_grid {
            return;
        }

        let mut out = self.out.borrow_mut();
        if photos.is_empty() {
            let _ = writeln!(out, "No photos yet. Add some with `photo-vault add <PATH>`.");
            return;
        }

        let _ = writeln!(out, "📷 {} photos", photos.len());
        for (index, photo) in photos.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>4}  {:<32}  {:>10}  {:<6}  {}",
                index,
                photo.name,
                display::format_file_size(photo.size),
                display::type_label(&photo.mime_type),
                photo.id,
            );
        }
    }

    fn show_details(&self, details: &PhotoDetails) {
        let mut out = self.out.borrow_mut();
        let _ = writeln!(out, "#{} {}", details.index, details.name);
        let _ = writeln!(out, "  Size:     {}", details.size_label);
        let _ = writeln!(out, "  Type:     {}", details.type_label);
        let _ = writeln!(out, "  Uploaded: {}", details.date_label);
    }

    fn set_loading(&self, loading: bool) {
        if loading {
            let _ = writeln!(self.out.borrow_mut(), "⏳ Uploading...");
        }
    }
}

/// Asks a yes/no question on the terminal.
pub struct PromptConfirmer<R: BufRead, W: Write> {
    input: RefCell<R>,
    out: RefCell<W>,
    assume_yes: bool,
}

impl PromptConfirmer<io::StdinLock<'static>, io::Stderr> {
    pub fn stdin(assume_yes: bool) -> Self {
        Self::new(io::stdin().lock(), io::stderr(), assume_yes)
    }
}

impl<R: BufRead, W: Write> PromptConfirmer<R, W> {
    pub fn new(input: R, out: W, assume_yes: bool) -> Self {
        Self {
            input: RefCell::new(input),
            out: RefCell::new(out),
            assume_yes,
        }
    }
}

impl<R: BufRead, W: Write> Confirmer for PromptConfirmer<R, W> {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        {
            let mut out = self.out.borrow_mut();
            let _ = write!(out, "{} [y/N] ", prompt);
            let _ = out.flush();
        }

        let mut answer = String::new();
        if self.input.borrow_mut().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
