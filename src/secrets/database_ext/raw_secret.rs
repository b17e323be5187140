use crate::{secrets::Secret, users::UserId};
use time::OffsetDateTime;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub(super) struct RawSecret {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub secret_type: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub version: i64,
}

impl TryFrom<RawSecret> for Secret {
    type Error = anyhow::Error;

    fn try_from(raw: RawSecret) -> Result<Self, Self::Error> {
        let mut secret = Secret::new(
            UserId::try_from(raw.user_id)?,
            &raw.name,
            &raw.secret_type,
        )?;
        secret.id = raw.id;
        secret.created_at = OffsetDateTime::from_unix_timestamp(raw.created_at)?;
        secret.updated_at = OffsetDateTime::from_unix_timestamp(raw.updated_at)?;
        secret.deleted_at = raw
            .deleted_at
            .map(OffsetDateTime::from_unix_timestamp)
            .transpose()?;
        secret.version = u32::try_from(raw.version)?;

        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::RawSecret;
    use crate::secrets::{Secret, SecretType, SecretsError};
    use time::OffsetDateTime;

    fn raw_secret() -> RawSecret {
        RawSecret {
            id: 5,
            user_id: 1,
            name: "email".to_string(),
            secret_type: "card".to_string(),
            // January 1, 2000 10:00:00 UTC
            created_at: 946720800,
            // January 1, 2000 10:00:10 UTC
            updated_at: 946720810,
            deleted_at: None,
            version: 1,
        }
    }

    #[test]
    fn can_convert_into_secret() -> anyhow::Result<()> {
        let secret = Secret::try_from(raw_secret())?;
        assert_eq!(secret.id, 5);
        assert_eq!(*secret.owner_id, 1);
        assert_eq!(secret.name, "email");
        assert_eq!(secret.secret_type(), SecretType::Card);
        assert_eq!(
            secret.created_at,
            OffsetDateTime::from_unix_timestamp(946720800)?
        );
        assert_eq!(
            secret.updated_at,
            OffsetDateTime::from_unix_timestamp(946720810)?
        );
        assert!(secret.deleted_at.is_none());
        assert_eq!(secret.version, 1);
        assert!(secret.data().is_none());

        let secret = Secret::try_from(RawSecret {
            deleted_at: Some(946720820),
            ..raw_secret()
        })?;
        assert_eq!(
            secret.deleted_at,
            Some(OffsetDateTime::from_unix_timestamp(946720820)?)
        );

        Ok(())
    }

    #[test]
    fn fails_if_malformed() {
        let err = Secret::try_from(RawSecret {
            secret_type: "otp".to_string(),
            ..raw_secret()
        })
        .unwrap_err();
        assert_eq!(
            err.downcast::<SecretsError>().unwrap(),
            SecretsError::InvalidSecretType("otp".to_string())
        );

        assert!(
            Secret::try_from(RawSecret {
                user_id: 0,
                ..raw_secret()
            })
            .is_err()
        );

        assert!(
            Secret::try_from(RawSecret {
                version: -1,
                ..raw_secret()
            })
            .is_err()
        );
    }
}
