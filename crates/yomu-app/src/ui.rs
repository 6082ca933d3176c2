use std::fmt::Write;

use yomu_core::{ReaderState, TokenView};
use yomu_types::{Preset, Token};

const DIM: &str = "\x1b[2m";
const RUBY: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub color: bool,
    pub show_ids: bool,
}

/// Render the reader screen: header, page body and status line
pub fn render(state: &ReaderState, page_size: usize, options: RenderOptions) -> String {
    let mut out = String::new();

    let Some(source) = &state.source else {
        out.push_str("No text selected. Use `open <path>` or `preset <n>` (`presets` lists them).\n");
        return out;
    };

    let _ = writeln!(
        out,
        "── {} ── Page {} / {} ──",
        source.display_name(),
        state.shown_page() + 1,
        state.page_count(page_size)
    );

    if state.loading {
        out.push_str("Loading... (`cancel` to abort)\n");
    } else if let Some(page) = &state.page {
        for paragraph in &page.paragraphs {
            for token in paragraph {
                render_token(&mut out, token, options);
            }
            out.push('\n');
        }
    }

    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "Error: {error}");
    }

    let mut nav = Vec::new();
    if state.has_prev() {
        nav.push("prev");
    }
    if state.has_next(page_size) {
        nav.push("next");
    }
    if !nav.is_empty() {
        let _ = writeln!(out, "[{}]", nav.join(" | "));
    }

    out
}

fn render_token(out: &mut String, token: &Token, options: RenderOptions) {
    if options.show_ids && token.is_word() {
        if let Some(id) = token.id {
            if options.color {
                let _ = write!(out, "{DIM}[{id}]{RESET}");
            } else {
                let _ = write!(out, "[{id}]");
            }
        }
    }

    match TokenView::of(token) {
        TokenView::Plain(text) => out.push_str(text),
        TokenView::Ruby { base, ruby } => {
            if options.color {
                let _ = write!(out, "{base}{RUBY}《{ruby}》{RESET}");
            } else {
                let _ = write!(out, "{base}《{ruby}》");
            }
        }
    }
}

pub fn render_presets(presets: &[Preset]) -> String {
    let mut out = String::from("Preset books:\n");
    for (i, preset) in presets.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} ({})", i + 1, preset.label, preset.id);
    }
    out
}

pub const HELP: &str = "\
Commands:
  open <path>        read a local text file
  preset <n|name>    read a preset book (`presets` lists them)
  next, n            next page
  prev, p            previous page
  toggle <id>, t     cycle furigana and translation of a word
  cancel             abort the page being loaded
  reset              close the current text
  page               redraw the current page
  quit, q            exit
";

pub fn draw(screen: &str) {
    print!("{screen}");
}

pub fn notice(message: &str) {
    println!("{message}");
}
