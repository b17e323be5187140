use serde::{Deserialize, Serialize};
use serde_with::{TimestampSeconds, serde_as};
use time::OffsetDateTime;

/// JWT claims struct.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Claims {
    /// ID of the user the token was issued to.
    pub user_id: i64,
    /// Token expiration time (UTC timestamp).
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub exp: OffsetDateTime,
}

#[cfg(test)]
mod test {
    use crate::security::jwt::Claims;
    use insta::assert_json_snapshot;
    use time::OffsetDateTime;

    #[test]
    fn serialization() -> anyhow::Result<()> {
        assert_json_snapshot!(Claims {
            user_id: 1,
            exp: OffsetDateTime::from_unix_timestamp(1262340000)?,
        }, @r###"
        {
          "user_id": 1,
          "exp": 1262340000
        }
        "###);

        Ok(())
    }

    #[test]
    fn deserialization() -> anyhow::Result<()> {
        assert_eq!(
            serde_json::from_str::<Claims>(
                r#"
        {
          "user_id": 1,
          "exp": 1262340000
        }"#
            )?,
            Claims {
                user_id: 1,
                exp: OffsetDateTime::from_unix_timestamp(1262340000)?,
            }
        );

        Ok(())
    }
}
