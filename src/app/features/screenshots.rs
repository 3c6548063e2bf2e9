use serde::Deserialize;
use ulid::Ulid;
use validator::Validate;

use crate::app::db::Screenshot;

/// Screenshot upload payload, shared by the script authoring and test lab
/// surfaces. The image arrives already encoded as a data URL; the server
/// stamps the id.
#[derive(Debug, Deserialize, Validate)]
pub struct ScreenshotPayload {
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "crate::app::domain::validation_helpers::check_data_url"))]
    pub path: String,
}

impl ScreenshotPayload {
    pub fn into_screenshot(self) -> Screenshot {
        Screenshot {
            id: Ulid::new().to_string(),
            filename: self.filename,
            description: self.description,
            path: self.path,
        }
    }
}

/// Convert a batch of uploads into stored screenshots.
pub fn into_screenshots(payloads: Vec<ScreenshotPayload>) -> Vec<Screenshot> {
    payloads
        .into_iter()
        .map(ScreenshotPayload::into_screenshot)
        .collect()
}
