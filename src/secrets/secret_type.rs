use crate::secrets::SecretsError;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Closed set of the supported secret types.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SecretType {
    Password,
    Card,
    Binary,
}

impl SecretType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Card => "card",
            Self::Binary => "binary",
        }
    }
}

impl FromStr for SecretType {
    type Err = SecretsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "password" => Ok(Self::Password),
            "card" => Ok(Self::Card),
            "binary" => Ok(Self::Binary),
            _ => Err(SecretsError::InvalidSecretType(value.to_string())),
        }
    }
}

impl Display for SecretType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::secrets::{SecretType, SecretsError};
    use insta::assert_json_snapshot;
    use std::str::FromStr;

    #[test]
    fn parsing() {
        for secret_type in [SecretType::Password, SecretType::Card, SecretType::Binary] {
            assert_eq!(SecretType::from_str(secret_type.as_str()), Ok(secret_type));
        }

        for value in ["note", "otp", "", "Password", " card"] {
            assert_eq!(
                SecretType::from_str(value),
                Err(SecretsError::InvalidSecretType(value.to_string()))
            );
        }
    }

    #[test]
    fn serialization() {
        assert_json_snapshot!(SecretType::Password, @r###""password""###);
        assert_json_snapshot!(SecretType::Card, @r###""card""###);
        assert_json_snapshot!(SecretType::Binary, @r###""binary""###);
    }
}
