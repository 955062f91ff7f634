//! HTML rendering of the weather grid
//!
//! Every render produces the complete content of the grid; nothing is patched in place.
//! All string fields of a record are escaped before they are embedded.

use crate::models::CityWeather;
use crate::sanitize::escape_html;
use crate::ui::Surface;
use std::sync::Arc;
use tracing::trace;

pub const LOADING_HTML: &str =
    r#"<div class="loading"><div class="spinner"></div><p>Loading weather data...</p></div>"#;

pub const NO_RESULTS_HTML: &str =
    r#"<div class="no-results">📍 No cities found. Try adjusting your search.</div>"#;

/// Markup for the loading state
#[must_use]
pub fn loading_html() -> String {
    LOADING_HTML.to_string()
}

/// Markup for an error message
#[must_use]
pub fn error_html(message: &str) -> String {
    format!(r#"<div class="no-results">❌ {}</div>"#, escape_html(message))
}

/// Markup for a list of records, or the no-results notice when empty
#[must_use]
pub fn results_html(records: &[CityWeather]) -> String {
    if records.is_empty() {
        return NO_RESULTS_HTML.to_string();
    }
    records.iter().map(card_html).collect()
}

/// Markup for a single weather card
#[must_use]
pub fn card_html(city: &CityWeather) -> String {
    format!(
        r#"
      <div class="weather-card">
        <div class="weather-header">
          <div>
            <div class="weather-title">{name}</div>
            <div class="weather-location">📍 {country}</div>
          </div>
          <div class="weather-icon">{icon}</div>
        </div>
        <div class="weather-condition">{condition}</div>
        <div class="temperature">{temperature}°</div>
        <div class="temp-label">Celsius</div>
        <div class="divider"></div>
        <div class="details">
          {feels_like}
          {humidity}
          {wind_speed}
          {status}
        </div>
      </div>
    "#,
        name = escape_html(&city.name),
        country = escape_html(&city.country),
        icon = escape_html(&city.icon),
        condition = escape_html(&city.condition),
        temperature = city.temperature,
        feels_like = detail_item("Feels Like", &format!("{}°C", city.feels_like)),
        humidity = detail_item("Humidity", &format!("{}%", city.humidity)),
        wind_speed = detail_item("Wind Speed", &format!("{} km/h", city.wind_speed)),
        status = detail_item("Status", "✓ Live"),
    )
}

fn detail_item(label: &str, value: &str) -> String {
    format!(
        r#"<div class="detail-item">
            <div class="detail-label">{label}</div>
            <div class="detail-value">{value}</div>
          </div>"#
    )
}

/// Writes rendered states to a shared surface
#[derive(Clone)]
pub struct Renderer {
    surface: Arc<dyn Surface>,
}

impl Renderer {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self { surface }
    }

    pub fn render_loading(&self) {
        trace!("Rendering loading state");
        self.surface.display(loading_html());
    }

    pub fn render_error(&self, message: &str) {
        trace!("Rendering error state");
        self.surface.display(error_html(message));
    }

    pub fn render_results(&self, records: &[CityWeather]) {
        trace!("Rendering {} cards", records.len());
        self.surface.display(results_html(records));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::RecordingSurface;

    fn paris() -> CityWeather {
        CityWeather {
            name: "Paris".to_string(),
            country: "France".to_string(),
            icon: "⛅".to_string(),
            condition: "Partly Cloudy".to_string(),
            temperature: 18.0,
            feels_like: 16.5,
            humidity: 65.0,
            wind_speed: 12.0,
        }
    }

    #[test]
    fn test_card_contains_fields() {
        let html = card_html(&paris());
        assert!(html.contains(r#"<div class="weather-title">Paris</div>"#));
        assert!(html.contains("📍 France"));
        assert!(html.contains(r#"<div class="weather-icon">⛅</div>"#));
        assert!(html.contains(r#"<div class="temperature">18°</div>"#));
        assert!(html.contains("16.5°C"));
        assert!(html.contains("65%"));
        assert!(html.contains("12 km/h"));
        assert!(html.contains("✓ Live"));
    }

    #[test]
    fn test_every_string_field_is_escaped() {
        let mut city = paris();
        city.name = "<script>alert(1)</script>".to_string();
        city.country = "<b>".to_string();
        city.icon = "<img src=x onerror=alert(2)>".to_string();
        city.condition = "\"quoted\" & <i>".to_string();

        let html = card_html(&city);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<i>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&quot;quoted&quot; &amp;"));
    }

    #[test]
    fn test_empty_results_show_notice() {
        assert_eq!(results_html(&[]), NO_RESULTS_HTML);
    }

    #[test]
    fn test_results_keep_order() {
        let mut porto = paris();
        porto.name = "Porto".to_string();
        let html = results_html(&[paris(), porto]);
        let paris_at = html.find("Paris").unwrap();
        let porto_at = html.find("Porto").unwrap();
        assert!(paris_at < porto_at);
        assert_eq!(html.matches("weather-card\"").count(), 2);
    }

    #[test]
    fn test_error_message_is_escaped() {
        assert_eq!(
            error_html("<script>x</script>"),
            r#"<div class="no-results">❌ &lt;script&gt;x&lt;/script&gt;</div>"#
        );
    }

    #[test]
    fn test_renderer_replaces_surface_content() {
        let surface = Arc::new(RecordingSurface::new());
        let renderer = Renderer::new(surface.clone());

        renderer.render_loading();
        renderer.render_results(&[paris()]);
        renderer.render_results(&[]);
        renderer.render_error("offline");

        let frames = surface.frames();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0], LOADING_HTML);
        assert!(frames[1].contains("Paris"));
        assert_eq!(frames[2], NO_RESULTS_HTML);
        assert!(frames[3].contains("❌ offline"));
    }
}
