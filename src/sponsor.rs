use serde::{Deserialize, Serialize};

/// One row of the principal-sponsor sheet: a male and a female sponsor shown
/// side by side. Either column may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalSponsor {
    #[serde(rename = "MalePrincipalSponsor", default)]
    pub male: String,

    #[serde(rename = "FemalePrincipalSponsor", default)]
    pub female: String,
}

impl PrincipalSponsor {
    pub fn new(male: impl Into<String>, female: impl Into<String>) -> Self {
        PrincipalSponsor {
            male: male.into(),
            female: female.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.male.is_empty() && self.female.is_empty()
    }
}

/// Rows worth displaying, in sheet order. Rows with both names empty are
/// dropped so the two columns stay aligned.
pub fn sponsor_pairs(sponsors: &[PrincipalSponsor]) -> Vec<&PrincipalSponsor> {
    sponsors.iter().filter(|s| !s.is_blank()).collect()
}
