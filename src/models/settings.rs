use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database entity representing a site setting
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize, ToSchema)]
pub struct SettingsEntry {
    pub id: i64,
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Helper constants for setting keys the backend itself reads
impl SettingsEntry {
    /// Address allowed to request a password reset code.
    pub const ADMIN_EMAIL: &'static str = "admin_email";
    pub const STORE_NAME: &'static str = "store_name";
}

/// Storefront contact details seeded by `/api/settings/initialize`.
pub const DEFAULT_SETTINGS: &[(&str, &str)] = &[
    ("phone_number", "0813-8535-3835"),
    ("whatsapp_number", "6281385353835"),
    ("instagram_link", "https://www.instagram.com/gudang.pancing"),
    ("tiktokshop_link", "https://vt.tiktok.com/ZSaphRMjk/?page=Mall"),
    ("tokopedia_link", "https://tk.tokopedia.com/ZSaprv2rN/"),
    ("shopee_link", "https://id.shp.ee/ziz2aZB"),
    ("store_name", "Gudang Pancing"),
    (
        "store_address",
        "Ruko Terrace 9, Jl Jati Utama Blok D No.52, Suvarna Sutera, Tangerang",
    ),
    ("operating_hours", "Senin - Minggu: 09.00 - 21.00 WIB"),
];

/// Served by the public settings endpoint when the store is unreachable.
pub const FALLBACK_SETTINGS: &[(&str, &str)] = &[
    ("phone_number", "0813-8535-3835"),
    ("whatsapp_number", "6281385353835"),
    ("instagram_link", "https://www.instagram.com/gudang.pancing"),
    ("store_name", "Gudang Pancing"),
];
