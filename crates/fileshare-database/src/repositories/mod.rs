//! PostgreSQL implementations of the store traits.

pub mod file;
pub mod grant;
pub mod user;

pub use file::FileRepository;
pub use grant::GrantRepository;
pub use user::UserRepository;

/// Escape `%`, `_` and `\` so user input matches literally inside a
/// `LIKE ... ESCAPE '\'` pattern.
pub(crate) fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
