use serde::Deserialize;
use serde_with::{base64::Base64, serde_as};

/// Parameters of a new secret, only the data that matches the secret type is used.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretCreateParams {
    #[serde(rename = "type")]
    pub secret_type: String,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub meta_data: Option<serde_json::Value>,
    pub password: Option<PasswordParams>,
    pub card: Option<CardParams>,
    pub binary: Option<BinaryParams>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PasswordParams {
    #[serde(default)]
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardParams {
    pub number: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub expire_date: String,
    #[serde(default)]
    pub cvv: String,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BinaryParams {
    pub name: String,
    #[serde_as(as = "Base64")]
    pub content: Vec<u8>,
}
