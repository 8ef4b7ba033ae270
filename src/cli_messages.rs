//! CLI command messaging
//!
//! Consistent, colored output for one-shot commands such as `nav`,
//! `configure` and `logout`.

/// Severity tag printed in front of a command message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Info,
    Warn,
    Error,
    Success,
}

impl Tag {
    fn label(self) -> &'static str {
        match self {
            Tag::Info => "\x1b[1;33m[INFO]\x1b[0m",
            Tag::Warn => "\x1b[1;91m[WARN]\x1b[0m",
            Tag::Error => "\x1b[1;31m[ERROR]\x1b[0m",
            Tag::Success => "\x1b[1;32m[SUCCESS]\x1b[0m",
        }
    }
}

/// Formats a tagged line; details are tab-separated from the title.
pub fn format_message(tag: Tag, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{} {}", tag.label(), title)
    } else {
        format!("{} {}\t {}", tag.label(), title, details)
    }
}

pub fn print_message(tag: Tag, title: &str, details: &str) {
    match tag {
        Tag::Error | Tag::Warn => eprintln!("{}", format_message(tag, title, details)),
        Tag::Info | Tag::Success => println!("{}", format_message(tag, title, details)),
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message($crate::cli_messages::Tag::Info, $title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message($crate::cli_messages::Tag::Warn, $title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_message($crate::cli_messages::Tag::Error, $title, "")
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_message($crate::cli_messages::Tag::Error, $title, $details)
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message($crate::cli_messages::Tag::Success, $title, &format!($($details)*))
    };
}
