//! Template configuration.
//!
//! The visual template is fixed, but its page geometry, company identity
//! and per-field placeholders are data. Every field has a default, so an
//! empty TOML file (or none at all) yields the stock itinerary.

use serde::Deserialize;

/// Configuration for one render pass.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TemplateConfig {
    /// Page size in layout units (millimetres).
    pub page: PageSize,
    /// Cursor reset value on every page.
    pub top_margin: f64,
    /// Left edge of every block.
    pub left_margin: f64,
    /// Space kept free at the bottom of each page for the footer band.
    pub bottom_reserve: f64,
    /// Distance from the bottom edge to the footer's first text baseline.
    pub footer_offset: f64,
    pub branding: Branding,
    /// Prefix for monetary amounts. The rupee sign is outside WinAnsi, so
    /// the default spells it out.
    pub currency_symbol: String,
    pub placeholders: Placeholders,
    /// Redraw a table's header band when its rows continue on a new page.
    pub repeat_table_headers: bool,
    /// Hard cap on the number of pages the recording canvas will create.
    pub max_pages: Option<usize>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            page: PageSize::default(),
            top_margin: 20.0,
            left_margin: 20.0,
            bottom_reserve: 50.0,
            footer_offset: 40.0,
            branding: Branding::default(),
            currency_symbol: "Rs.".to_string(),
            placeholders: Placeholders::default(),
            repeat_table_headers: false,
            max_pages: None,
        }
    }
}

impl TemplateConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Width available between the left and right margins.
    pub fn usable_width(&self) -> f64 {
        self.page.width - 2.0 * self.left_margin
    }

    /// Lowest y any block may reach.
    pub fn content_limit(&self) -> f64 {
        self.page.height - self.bottom_reserve
    }
}

/// Page dimensions in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl Default for PageSize {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
        }
    }
}

/// Company identity stamped in the header and on every footer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Branding {
    pub name: String,
    pub tagline: String,
    pub company: String,
    pub address: Vec<String>,
    pub phone: String,
    pub email: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "vigovia".to_string(),
            tagline: "PLAN.PACK.GO".to_string(),
            company: "Vigovia Tech Pvt. Ltd".to_string(),
            address: vec![
                "Registered Office: Hd-109 Cinnabar Hills,".to_string(),
                "Links Business Park, Karnataka, India".to_string(),
            ],
            phone: "+91-99X9999999".to_string(),
            email: "Contact@Vigovia.Com".to_string(),
        }
    }
}

/// Literal text shown when a field is empty. A `None` entry renders the
/// field blank. Fields without an entry here are always blank when empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub day_date: Option<String>,
    pub flight_date: Option<String>,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            day_date: Some("27th November".to_string()),
            flight_date: Some("Thu 10 Jan'24".to_string()),
        }
    }
}

/// Resolve an empty field against its placeholder.
pub fn or_placeholder<'a>(value: &'a str, placeholder: Option<&'a str>) -> &'a str {
    if value.is_empty() {
        placeholder.unwrap_or("")
    } else {
        value
    }
}
