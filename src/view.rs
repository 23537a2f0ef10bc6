//! Pure renderers from a state snapshot to a complete view tree.
//!
//! Nothing here performs I/O or touches the store. The egui layer in `ui` paints
//! whatever [`render`] returns, and the CLI prints parts of it as text.

use serde_json::Value;

use crate::app_data::rover_facts;
use crate::config::ApiVariant;
use crate::fetch::RoverData;
use crate::state::Snapshot;
use crate::util::{format_count, format_date, truncate_description};

/// Gallery size for the latest-photos dashboard
pub const PHOTOS_GALLERY_LIMIT: usize = 12;

/// Gallery size for the image-search dashboard
pub const SEARCH_GALLERY_LIMIT: usize = 24;

/// The whole dashboard, rebuilt from scratch on every state change
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub header: Header,
    pub tabs: Vec<RoverTab>,
    pub content: Content,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: String,
    pub subtitle: Option<String>,
    pub greeting: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoverTab {
    pub rover: String,
    pub active: bool,
}

/// Main content area below the tabs
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Fetch in flight and nothing cached for the selected rover
    Loading(String),
    /// Full-width error banner
    Error(String),
    /// Nothing fetched yet
    Placeholder(String),
    Rover { info: RoverInfo, gallery: Gallery },
}

/// A label/value pair such as "Status: Active"
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub label: &'static str,
    pub value: String,
}

impl Fact {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoverInfo {
    pub heading: String,
    pub description: Option<String>,
    pub facts: Vec<Fact>,
}

impl RoverInfo {
    /// Value of the fact with the given label
    pub fn fact(&self, label: &str) -> Option<&str> {
        self.facts.iter().find(|f| f.label == label).map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gallery {
    /// Fixed "no results" message instead of an empty grid
    Empty(String),
    Items { heading: String, items: Vec<GalleryItem> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    /// Absent when upstream gave no usable link
    pub image_url: Option<String>,
    pub alt: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub facts: Vec<Fact>,
}

/// Render a complete view from a snapshot
pub fn render(state: &Snapshot) -> View {
    View {
        header: header(state),
        tabs: rover_tabs(state),
        content: rover_content(state),
        footer: footer(state.variant),
    }
}

fn header(state: &Snapshot) -> Header {
    let subtitle = match state.variant {
        ApiVariant::Photos => None,
        ApiVariant::ImageSearch => Some("Explore images from NASA's Mars Rovers".to_string()),
    };

    Header {
        title: "Mars Rover Dashboard".to_string(),
        subtitle,
        greeting: format!("Welcome, {}", state.user.name),
    }
}

fn footer(variant: ApiVariant) -> String {
    match variant {
        ApiVariant::Photos => "Data provided by NASA's Mars Rover API".to_string(),
        ApiVariant::ImageSearch => "Data provided by NASA's Image and Video Library".to_string(),
    }
}

fn rover_tabs(state: &Snapshot) -> Vec<RoverTab> {
    state
        .rovers
        .iter()
        .map(|rover| RoverTab {
            rover: rover.clone(),
            active: *rover == state.selected_rover,
        })
        .collect()
}

fn rover_content(state: &Snapshot) -> Content {
    let rover = &state.selected_rover;
    let noun = match state.variant {
        ApiVariant::Photos => "data",
        ApiVariant::ImageSearch => "images",
    };
    let data = state.selected_data();

    // Cached data stays on screen while a refetch is in flight
    if state.loading && data.is_none() {
        return Content::Loading(format!("Loading {} {}...", rover, noun));
    }

    if let Some(error) = &state.error {
        return Content::Error(format!("Error: {}", error));
    }

    match data {
        None => Content::Placeholder(format!("Select a rover to view {}", noun)),
        Some(data) => Content::Rover {
            info: rover_info(rover, data),
            gallery: image_gallery(rover, data),
        },
    }
}

/// Rover info panel for a fetched payload
pub fn rover_info(rover: &str, data: &RoverData) -> RoverInfo {
    match data {
        RoverData::Photos { photo_manifest, .. } => manifest_info(rover, photo_manifest),
        RoverData::Search(search) => facts_info(rover, search),
    }
}

/// Gallery for a fetched payload
pub fn image_gallery(rover: &str, data: &RoverData) -> Gallery {
    match data {
        RoverData::Photos { photo_manifest, latest_photos } => {
            let name = str_at(photo_manifest, "/name").unwrap_or(rover);
            photo_gallery(name, latest_photos)
        }
        RoverData::Search(search) => search_gallery(rover, search),
    }
}

fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

fn manifest_info(rover: &str, manifest: &Value) -> RoverInfo {
    let name = str_at(manifest, "/name").unwrap_or(rover);
    let number = |pointer: &str| manifest.pointer(pointer).and_then(Value::as_u64);

    RoverInfo {
        heading: format!("{} Rover", name),
        description: None,
        facts: vec![
            Fact::new("Status", str_at(manifest, "/status").unwrap_or("Unknown")),
            Fact::new("Launch Date", format_date(str_at(manifest, "/launch_date"))),
            Fact::new("Landing Date", format_date(str_at(manifest, "/landing_date"))),
            Fact::new(
                "Total Photos",
                number("/total_photos").map(format_count).unwrap_or_else(|| "N/A".to_string()),
            ),
            Fact::new(
                "Max Sol",
                number("/max_sol").map(|sol| sol.to_string()).unwrap_or_else(|| "N/A".to_string()),
            ),
            Fact::new("Max Date", format_date(str_at(manifest, "/max_date"))),
        ],
    }
}

fn facts_info(rover: &str, search: &Value) -> RoverInfo {
    let facts = rover_facts(rover);
    let total_hits = search
        .pointer("/collection/metadata/total_hits")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    RoverInfo {
        heading: format!("{} Rover", rover),
        description: facts.map(|f| f.description.clone()),
        facts: vec![
            Fact::new("Status", facts.map(|f| f.status.as_str()).unwrap_or("Unknown")),
            Fact::new("Launch Date", format_date(facts.map(|f| f.launch.as_str()))),
            Fact::new("Landing Date", format_date(facts.map(|f| f.landing.as_str()))),
            Fact::new("Images Found", format_count(total_hits)),
        ],
    }
}

fn photo_gallery(rover_name: &str, photos: &Value) -> Gallery {
    let photos = photos.as_array().map(Vec::as_slice).unwrap_or_default();
    if photos.is_empty() {
        return Gallery::Empty("No recent photos available".to_string());
    }

    let items = photos
        .iter()
        .take(PHOTOS_GALLERY_LIMIT)
        .map(|photo| {
            let taken_by = str_at(photo, "/rover/name").unwrap_or(rover_name);
            let sol = photo
                .get("sol")
                .and_then(Value::as_u64)
                .map(|s| s.to_string())
                .unwrap_or_else(|| "N/A".to_string());

            GalleryItem {
                image_url: str_at(photo, "/img_src").map(str::to_string),
                alt: format!("Mars photo by {}", taken_by),
                title: None,
                description: None,
                facts: vec![
                    Fact::new("Camera", str_at(photo, "/camera/full_name").unwrap_or("Unknown camera")),
                    Fact::new("Date", format_date(str_at(photo, "/earth_date"))),
                    Fact::new("Sol", sol),
                ],
            }
        })
        .collect();

    Gallery::Items {
        heading: format!("Latest Photos from {}", rover_name),
        items,
    }
}

fn search_gallery(rover: &str, search: &Value) -> Gallery {
    let items = search
        .pointer("/collection/items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if items.is_empty() {
        return Gallery::Empty(format!("No images found for {}", rover));
    }

    let items = items
        .iter()
        .take(SEARCH_GALLERY_LIMIT)
        .map(|item| {
            let field = |key: &str| item.pointer(&format!("/data/0/{}", key)).and_then(Value::as_str);
            let title = field("title").unwrap_or("Untitled").to_string();
            let description = field("description").unwrap_or("No description available");

            GalleryItem {
                image_url: image_link(item),
                alt: title.clone(),
                title: Some(title),
                description: Some(truncate_description(description)),
                facts: vec![Fact::new("Date", format_date(field("date_created")))],
            }
        })
        .collect();

    Gallery::Items {
        heading: format!("Images from {}", rover),
        items,
    }
}

/// First link rendered as an image
fn image_link(item: &Value) -> Option<String> {
    item.get("links")?
        .as_array()?
        .iter()
        .find(|link| link.get("render").and_then(Value::as_str) == Some("image"))
        .and_then(|link| str_at(link, "/href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}
