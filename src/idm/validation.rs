use crate::error::{Error, Result};

/// Rejects names the store would accept but no host can resolve.
pub fn validate_name(name: &str, entity: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName(format!("{entity} name cannot be empty")));
    }
    if name.contains('\0') {
        return Err(Error::InvalidName(format!(
            "{entity} name cannot contain NUL characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("staff", "Group").is_ok());
        assert!(validate_name("invalid group", "Group").is_ok());
        assert!(matches!(
            validate_name("", "User"),
            Err(Error::InvalidName(msg)) if msg == "User name cannot be empty"
        ));
        assert!(validate_name("a\0b", "User").is_err());
    }
}
