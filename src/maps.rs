//! Static map image URLs for subjects with coordinates.

use crate::config::MapsConfig;
use crate::subject::{Coordinates, SubjectSummary};
use reqwest::Url;

/// Builds static map image URLs. The API key comes from configuration only.
#[derive(Debug, Clone)]
pub struct StaticMap {
    base_url: String,
    zoom: u8,
    width: u32,
    height: u32,
    api_key: Option<String>,
}

impl StaticMap {
    pub fn new(config: &MapsConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            zoom: config.zoom,
            width: config.width,
            height: config.height,
            api_key: config.api_key.clone(),
        }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Map centred on the subject, or `None` without coordinates or an API key.
    pub fn url_for(&self, subject: &SubjectSummary) -> Option<String> {
        self.url_at(subject.coordinates?)
    }

    pub fn url_at(&self, at: Coordinates) -> Option<String> {
        let key = self.api_key.as_deref()?;
        let center = format!("{},{}", at.lat, at.lon);
        let size = format!("{}x{}", self.width, self.height);
        let zoom = self.zoom.to_string();

        let url = Url::parse_with_params(
            &self.base_url,
            [
                ("center", center.as_str()),
                ("zoom", zoom.as_str()),
                ("size", size.as_str()),
                ("markers", center.as_str()),
                ("key", key),
            ],
        );
        match url {
            Ok(url) => Some(url.into()),
            Err(e) => {
                tracing::warn!(base_url = %self.base_url, error = %e, "invalid static map URL");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps(api_key: Option<&str>) -> StaticMap {
        StaticMap::new(&MapsConfig {
            api_key: api_key.map(String::from),
            ..MapsConfig::default()
        })
    }

    fn wembley() -> SubjectSummary {
        SubjectSummary {
            coordinates: Some(Coordinates {
                lat: 51.556,
                lon: -0.2795,
            }),
            ..SubjectSummary::not_found("Wembley Stadium")
        }
    }

    #[test]
    fn builds_url_with_center_and_key() {
        let url = maps(Some("secret")).url_for(&wembley()).unwrap();
        assert_eq!(
            url,
            "https://maps.googleapis.com/maps/api/staticmap?center=51.556%2C-0.2795&zoom=15\
             &size=600x300&markers=51.556%2C-0.2795&key=secret"
        );
    }

    #[test]
    fn no_key_means_no_map() {
        let maps = maps(None);
        assert!(!maps.has_key());
        assert!(maps.url_for(&wembley()).is_none());
    }

    #[test]
    fn no_coordinates_means_no_map() {
        let subject = SubjectSummary::not_found("Stamford Bridge");
        assert!(maps(Some("secret")).url_for(&subject).is_none());
    }

    #[test]
    fn invalid_base_url_means_no_map() {
        let maps = StaticMap::new(&MapsConfig {
            base_url: "::nonsense".to_string(),
            api_key: Some("secret".to_string()),
            ..MapsConfig::default()
        });
        assert!(maps.url_for(&wembley()).is_none());
    }
}
