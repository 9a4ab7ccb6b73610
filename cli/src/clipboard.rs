//! Copy-to-clipboard with a terminal fallback.
//!
//! The system clipboard tool is tried first. When there is none, or it fails,
//! the text is sent to the terminal as an OSC 52 sequence. Either way the
//! caller gets a [`Notice`] to show.

use std::{
    env,
    io::{self, IsTerminal, Write},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use prompt_hub_shared::{Notice, PromptItem};

use crate::cli::CopyTarget;

/// Shown whenever neither path managed to copy.
pub const COPY_FAILED: &str = "复制失败，请手动复制";

/// Shown when the prompt has no example to copy.
pub const NOTHING_TO_COPY: &str = "该提示词没有使用案例";

/// Something that can put text on a clipboard.
pub trait ClipboardBackend {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Copy `text`.
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// Success message for a copy target.
pub fn success_message(target: CopyTarget) -> &'static str {
    match target {
        CopyTarget::Card => "提示词已复制到剪贴板",
        CopyTarget::Template => "提示词模板已复制到剪贴板",
        CopyTarget::Example => "使用案例已复制到剪贴板",
    }
}

/// Text a copy action takes from `prompt`, if it has any.
pub fn copy_text(prompt: &PromptItem, target: CopyTarget) -> Option<&str> {
    match target {
        CopyTarget::Card | CopyTarget::Template => Some(prompt.description.as_str()),
        CopyTarget::Example => prompt.example.as_deref(),
    }
}

/// Copy `text`, falling back when `primary` is missing or fails.
pub fn copy_with_fallback(
    primary: Option<&mut dyn ClipboardBackend>,
    fallback: &mut dyn ClipboardBackend,
    text: &str,
    target: CopyTarget,
) -> Notice {
    if let Some(primary) = primary {
        match primary.write_text(text) {
            Ok(()) => return Notice::success(success_message(target)),
            Err(err) => {
                tracing::warn!("{} copy failed, falling back: {err}", primary.name());
            },
        }
    }

    match fallback.write_text(text) {
        Ok(()) => Notice::success(success_message(target)),
        Err(err) => {
            tracing::warn!("{} copy failed: {err}", fallback.name());
            Notice::error(COPY_FAILED)
        },
    }
}

/// Copy one prompt field with the default backends of this machine.
pub fn copy_prompt(prompt: &PromptItem, target: CopyTarget) -> Notice {
    let Some(text) = copy_text(prompt, target) else {
        return Notice::error(NOTHING_TO_COPY);
    };

    let mut system = SystemClipboard::detect();
    let mut terminal = Osc52Clipboard::stdout();
    copy_with_fallback(
        system
            .as_mut()
            .map(|backend| backend as &mut dyn ClipboardBackend),
        &mut terminal,
        text,
        target,
    )
}

/// A clipboard command-line tool found on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    program: PathBuf,
    args: &'static [&'static str],
}

impl SystemClipboard {
    /// Use `program` with `args`, reading the text on stdin.
    pub fn new(program: impl Into<PathBuf>, args: &'static [&'static str]) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// First supported tool available here, if any.
    pub fn detect() -> Option<Self> {
        let wayland = env::var_os("WAYLAND_DISPLAY").is_some();
        candidates(wayland).into_iter().find_map(|(name, args)| {
            find_program(name).map(|program| Self::new(program, args))
        })
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system clipboard"
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut child = Command::new(&self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // Dropping stdin closes the pipe; the child is reaped even when the
        // write failed.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("{} exited with {status}", self.program.display())))
        }
    }
}

type Candidate = (&'static str, &'static [&'static str]);

const PBCOPY: Candidate = ("pbcopy", &[]);
const CLIP: Candidate = ("clip.exe", &[]);
const WL_COPY: Candidate = ("wl-copy", &[]);
const XCLIP: Candidate = ("xclip", &["-selection", "clipboard"]);
const XSEL: Candidate = ("xsel", &["--clipboard", "--input"]);

fn candidates(wayland: bool) -> Vec<Candidate> {
    if cfg!(target_os = "macos") {
        vec![PBCOPY]
    } else if cfg!(windows) {
        vec![CLIP]
    } else if wayland {
        vec![WL_COPY, XCLIP, XSEL]
    } else {
        vec![XCLIP, XSEL]
    }
}

fn find_program(name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_file(candidate))
}

fn is_file(path: &Path) -> bool {
    path.metadata()
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

/// OSC 52 escape sequence written to a terminal.
pub struct Osc52Clipboard<W> {
    out: W,
    is_terminal: bool,
}

impl<W: Write> Osc52Clipboard<W> {
    /// Write to `out`; only a terminal is asked to copy.
    pub fn new(out: W, is_terminal: bool) -> Self {
        Self {
            out,
            is_terminal,
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<io::Stdout> {
    /// Standard output, checked for being a terminal.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let is_terminal = out.is_terminal();
        Self::new(out, is_terminal)
    }
}

/// The escape sequence that asks the terminal to copy `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write> ClipboardBackend for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "terminal (OSC 52)"
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        if !self.is_terminal {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "output is not a terminal"));
        }
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()
    }
}
