//! Profile Data

use crate::domain::profiles::ProfilesServiceError;

/// Editable profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub headline: Option<String>,
    pub organization: Option<String>,
    pub bio: Option<String>,
}

impl ProfileUpdate {
    /// Trim every field and drop blank optional ones.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilesServiceError::InvalidData`] when the display name is blank.
    pub fn normalized(self) -> Result<Self, ProfilesServiceError> {
        let display_name = self.display_name.trim().to_string();

        if display_name.is_empty() {
            return Err(ProfilesServiceError::InvalidData);
        }

        Ok(Self {
            display_name,
            headline: non_blank(self.headline),
            organization: non_blank(self.organization),
            bio: non_blank(self.bio),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn normalizing_trims_and_drops_blanks() -> TestResult {
        let update = ProfileUpdate {
            display_name: "  Ada Lovelace ".to_string(),
            headline: Some("   ".to_string()),
            organization: Some(" Analytical FC ".to_string()),
            bio: None,
        }
        .normalized()?;

        assert_eq!(update.display_name, "Ada Lovelace");
        assert_eq!(update.headline, None);
        assert_eq!(update.organization.as_deref(), Some("Analytical FC"));

        Ok(())
    }

    #[test]
    fn blank_display_name_is_invalid() {
        let result = ProfileUpdate {
            display_name: " \t ".to_string(),
            ..ProfileUpdate::default()
        }
        .normalized();

        assert!(matches!(result, Err(ProfilesServiceError::InvalidData)));
    }
}
