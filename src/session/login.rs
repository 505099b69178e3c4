const FORBIDDEN_PASSWORD_CHARS: [char; 8] = [':', ';', '?', '.', ',', '!', '@', '#'];
const MIN_PASSWORD_CHARS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    InvalidName,
    InvalidPassword,
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Both cases show the same generic message to the user.
        match self {
            LoginError::InvalidName | LoginError::InvalidPassword => write!(f, "Datos no válidos"),
        }
    }
}

impl std::error::Error for LoginError {}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' ' || "ÁÉÍÓÚáéíóúÑñ".contains(c)
}

/// Letters (with Spanish accents and ñ) and spaces only.
pub fn validate_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_name_char)
}

pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
        && !password.chars().any(|c| FORBIDDEN_PASSWORD_CHARS.contains(&c))
}

/// Trims both fields and validates them, returning the name to store.
pub fn check_credentials(name: &str, password: &str) -> Result<String, LoginError> {
    let name = name.trim();
    let password = password.trim();
    if !validate_name(name) {
        return Err(LoginError::InvalidName);
    }
    if !validate_password(password) {
        return Err(LoginError::InvalidPassword);
    }
    Ok(name.to_string())
}

/// "Hola Ana" for "aNA"; "Hola usuario" when nobody is logged in.
pub fn greeting(username: &str) -> String {
    let mut chars = username.chars();
    match chars.next() {
        Some(first) => {
            let head: String = first.to_uppercase().collect();
            let tail: String = chars.as_str().to_lowercase();
            format!("Hola {}{}", head, tail)
        }
        None => "Hola usuario".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_accept_accents_and_spaces() {
        assert!(validate_name("José Ñúñez"));
        assert!(validate_name("ana"));
        assert!(!validate_name(""));
        assert!(!validate_name("ana3"));
        assert!(!validate_name("ana_b"));
    }

    #[test]
    fn passwords_need_four_chars_without_punctuation() {
        assert!(validate_password("gremlin"));
        assert!(validate_password("ñaña"));
        assert!(!validate_password("abc"));
        assert!(!validate_password("abc.def"));
        assert!(!validate_password("hola#"));
    }

    #[test]
    fn credentials_are_trimmed() {
        assert_eq!(check_credentials("  Ana ", " 1234 "), Ok("Ana".to_string()));
        assert_eq!(check_credentials("Ana", "12"), Err(LoginError::InvalidPassword));
        assert_eq!(check_credentials("4na", "1234"), Err(LoginError::InvalidName));
        assert_eq!(LoginError::InvalidName.to_string(), "Datos no válidos");
    }

    #[test]
    fn greeting_capitalizes() {
        assert_eq!(greeting("aNA"), "Hola Ana");
        assert_eq!(greeting("ángel"), "Hola Ángel");
        assert_eq!(greeting(""), "Hola usuario");
    }
}
