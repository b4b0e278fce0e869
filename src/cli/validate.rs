//! Input validation for the shell
//!
//! All semantic validation happens here, before the store is invoked.
//! Errors are user-facing message strings, not `CatalogError`s.

/// Default publication year when the field is left blank
pub const DEFAULT_YEAR: i32 = 2023;

/// Minimum username length for registration
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length for registration
pub const MIN_PASSWORD_LEN: usize = 4;

/// Validate a login attempt's fields
pub fn validate_login(username: &str, password: &str) -> Result<(), String> {
    if username.is_empty() || password.is_empty() {
        return Err("Please enter both username and password".into());
    }
    Ok(())
}

/// Validate registration fields
///
/// Username, password, and full name are required; email and phone are not.
pub fn validate_registration(
    username: &str,
    password: &str,
    full_name: &str,
) -> Result<(), String> {
    if username.is_empty() || password.is_empty() || full_name.is_empty() {
        return Err("Please fill in all required fields".into());
    }
    if username.len() < MIN_USERNAME_LEN {
        return Err(format!(
            "Username must be at least {} characters",
            MIN_USERNAME_LEN
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

/// Validate the required book fields
pub fn validate_book_fields(
    isbn: &str,
    title: &str,
    author: &str,
    genre: &str,
) -> Result<(), String> {
    if isbn.is_empty() || title.is_empty() || author.is_empty() || genre.is_empty() {
        return Err("Please fill in all required fields (*)".into());
    }
    Ok(())
}

/// Parse a publication year, defaulting when the field is blank
pub fn parse_year(input: &str) -> Result<i32, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_YEAR);
    }
    input
        .parse()
        .map_err(|_| "Please enter valid numbers for year and copies".to_string())
}

/// Parse a copy count
pub fn parse_copies(input: &str) -> Result<u32, String> {
    input
        .trim()
        .parse()
        .map_err(|_| "Please enter valid numbers for year and copies".to_string())
}
