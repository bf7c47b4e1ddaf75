use crate::StoreError;

/// Checks that `name` can be used as a file name inside a project directory.
///
/// # Errors
/// Returns [`StoreError::InvalidName`] for empty names, `.`/`..`, and names containing path
/// separators or NUL.
pub fn validate_script_name(name: &str) -> Result<(), StoreError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
    {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("init.gradle")]
    #[case("build-cache.gradle.kts")]
    #[case(".hidden")]
    #[case("with space.gradle")]
    fn test_valid_names(#[case] name: &str) {
        assert!(validate_script_name(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case("../escape.gradle")]
    #[case("dir/init.gradle")]
    #[case("dir\\init.gradle")]
    #[case("nul\0.gradle")]
    fn test_invalid_names(#[case] name: &str) {
        assert!(matches!(
            validate_script_name(name),
            Err(StoreError::InvalidName(_))
        ));
    }
}
