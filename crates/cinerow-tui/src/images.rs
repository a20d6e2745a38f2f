//! Poster loading and half-block rendering.
//!
//! Posters are fetched on tokio tasks (disk cache first, then HTTP), decoded
//! and scaled off the event loop, and delivered back as [`ImageLoadResult`]s
//! over an mpsc channel. The UI thread only ever sees finished cell grids.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use cinerow_core::carousel::{ImageOutcome, ImageTicket};
use image::imageops::FilterType;
use image::DynamicImage;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::event::ImageLoadResult;

/// Image pre-scaled to a cell grid; each cell holds a top and a bottom pixel
#[derive(Debug, Clone, PartialEq)]
pub struct HalfBlockImage {
    width: u16,
    height: u16,
    cells: Vec<(Color, Color)>,
}

impl HalfBlockImage {
    /// Scale `img` to cover `width` x `height` cells, cropping the overflow
    pub fn from_image(img: &DynamicImage, width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let resized = img.resize_to_fill(
            u32::from(width),
            u32::from(height) * 2,
            FilterType::Triangle,
        );
        let rgb = resized.to_rgb8();

        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        for row in 0..u32::from(height) {
            for x in 0..u32::from(width) {
                let top = rgb.get_pixel(x, row * 2);
                let bottom = rgb.get_pixel(x, row * 2 + 1);
                cells.push((
                    Color::Rgb(top[0], top[1], top[2]),
                    Color::Rgb(bottom[0], bottom[1], bottom[2]),
                ));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<(Color, Color)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }

    /// Draw into `area` with ▀ cells, scaling brightness by `brightness`
    pub fn render(&self, buf: &mut Buffer, area: Rect, brightness: f64) {
        let area = area.intersection(buf.area);
        for dy in 0..area.height.min(self.height) {
            for dx in 0..area.width.min(self.width) {
                let Some((top, bottom)) = self.cell(dx, dy) else {
                    continue;
                };
                buf[(area.x + dx, area.y + dy)]
                    .set_symbol("▀")
                    .set_fg(dim(top, brightness))
                    .set_bg(dim(bottom, brightness));
            }
        }
    }
}

/// Scale an RGB color toward black
pub fn dim(color: Color, brightness: f64) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = brightness.clamp(0.0, 1.0);
            let scale = |c: u8| (f64::from(c) * f).round() as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

/// Local disk cache for poster bytes under `<data_dir>/posters`
#[derive(Debug, Clone)]
pub struct PosterDiskCache {
    cache_dir: PathBuf,
}

impl PosterDiskCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let cache_dir = cache_dir.into();
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Stable file name for a URL: hash plus the image extension if recognised
    fn url_to_filename(url: &str) -> String {
        let mut hasher = DefaultHasher::new();
        url.hash(&mut hasher);
        let hash = hasher.finish();

        let ext = url
            .split('?')
            .next()
            .and_then(|path| path.rsplit('.').next())
            .map(|e| e.to_lowercase())
            .filter(|e| ["jpg", "jpeg", "png", "gif", "webp"].contains(&e.as_str()))
            .unwrap_or_else(|| "bin".to_string());

        format!("{:016x}.{}", hash, ext)
    }

    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(Self::url_to_filename(url))
    }

    pub async fn load(&self, url: &str) -> Option<Vec<u8>> {
        tokio::fs::read(self.cache_path(url)).await.ok()
    }

    pub async fn save(&self, url: &str, data: &[u8]) -> std::io::Result<()> {
        tokio::fs::write(self.cache_path(url), data).await
    }
}

/// State of one URL in the memory cache
#[derive(Debug, Clone)]
pub enum PosterState {
    Loading,
    Ready(Arc<HalfBlockImage>),
    Failed(String),
}

/// What the caller has to do for a poster request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterRequest {
    /// Already resolved; apply the outcome right away
    Cached(ImageOutcome),
    /// First request for this URL; spawn a load
    Spawn,
    /// A load for this URL is already in flight
    Pending,
}

/// In-memory poster cache keyed by URL
///
/// Several cards may share a URL, so tickets wait per URL and are all
/// resolved by a single load.
pub struct PosterCache {
    entries: HashMap<String, PosterState>,
    waiting: HashMap<String, Vec<ImageTicket>>,
    size: (u16, u16),
    disk: Option<PosterDiskCache>,
}

impl PosterCache {
    /// Cache producing posters of `size` (cells); disk cache enabled when `disk_dir` is set
    pub fn new(size: (u16, u16), disk_dir: Option<PathBuf>) -> Self {
        let disk = disk_dir.and_then(|dir| match PosterDiskCache::new(&dir) {
            Ok(cache) => Some(cache),
            Err(e) => {
                warn!("Poster disk cache disabled ({}): {}", dir.display(), e);
                None
            }
        });
        Self {
            entries: HashMap::new(),
            waiting: HashMap::new(),
            size,
            disk,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn disk(&self) -> Option<&PosterDiskCache> {
        self.disk.as_ref()
    }

    pub fn get(&self, url: &str) -> Option<&HalfBlockImage> {
        match self.entries.get(url) {
            Some(PosterState::Ready(image)) => Some(image),
            _ => None,
        }
    }

    pub fn is_loading(&self, url: &str) -> bool {
        matches!(self.entries.get(url), Some(PosterState::Loading))
    }

    /// Register interest in a URL without a card ticket
    pub fn request_url(&mut self, url: &str) -> PosterRequest {
        match self.entries.get(url) {
            Some(PosterState::Ready(_)) => PosterRequest::Cached(ImageOutcome::Loaded),
            Some(PosterState::Failed(e)) => PosterRequest::Cached(ImageOutcome::Failed(e.clone())),
            Some(PosterState::Loading) => PosterRequest::Pending,
            None => {
                self.entries.insert(url.to_string(), PosterState::Loading);
                PosterRequest::Spawn
            }
        }
    }

    /// Register a card's ticket for its poster
    pub fn request(&mut self, ticket: ImageTicket) -> PosterRequest {
        let request = self.request_url(&ticket.url);
        if !matches!(request, PosterRequest::Cached(_)) {
            self.waiting.entry(ticket.url.clone()).or_default().push(ticket);
        }
        request
    }

    /// Store a finished load and hand back every ticket waiting on it
    pub fn complete(&mut self, result: ImageLoadResult) -> Vec<(ImageTicket, ImageOutcome)> {
        let (url, state, outcome) = match result {
            ImageLoadResult::Success { url, poster } => {
                (url, PosterState::Ready(Arc::new(poster)), ImageOutcome::Loaded)
            }
            ImageLoadResult::Failure { url, error } => (
                url,
                PosterState::Failed(error.clone()),
                ImageOutcome::Failed(error),
            ),
        };
        self.entries.insert(url.clone(), state);
        self.waiting
            .remove(&url)
            .unwrap_or_default()
            .into_iter()
            .map(|ticket| (ticket, outcome.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shared HTTP client for poster downloads
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("cinerow/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(20))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
}

/// Fetch poster bytes; supports http(s) and file URLs
pub async fn fetch_poster_bytes(client: &reqwest::Client, url: &str) -> Result<Bytes, String> {
    let parsed = url::Url::parse(url).map_err(|e| format!("Invalid URL: {}", e))?;
    match parsed.scheme() {
        "http" | "https" => {
            let response = client
                .get(parsed)
                .header("Accept", "image/png,image/jpeg,image/gif,image/webp,image/*;q=0.8")
                .send()
                .await
                .map_err(|e| format!("Request failed: {}", e))?;

            if !response.status().is_success() {
                return Err(format!("HTTP {}", response.status().as_u16()));
            }
            response
                .bytes()
                .await
                .map_err(|e| format!("Read error: {}", e))
        }
        "file" => {
            let path = parsed
                .to_file_path()
                .map_err(|_| format!("Invalid file URL: {}", url))?;
            tokio::fs::read(&path)
                .await
                .map(Bytes::from)
                .map_err(|e| format!("{}: {}", path.display(), e))
        }
        other => Err(format!("Unsupported scheme '{}'", other)),
    }
}

/// Decode image bytes with format detection
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, String> {
    if bytes.is_empty() {
        return Err("Empty data".to_string());
    }

    if let Ok(img) = image::load_from_memory(bytes) {
        return Ok(img);
    }

    // Retry with the format named by the magic bytes for a better error
    let format = if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(image::ImageFormat::Png)
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        Some(image::ImageFormat::Jpeg)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(image::ImageFormat::Gif)
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some(image::ImageFormat::WebP)
    } else {
        None
    };

    match format {
        Some(format) => image::load_from_memory_with_format(bytes, format)
            .map_err(|e| format!("{:?}: {}", format, e)),
        None => Err(format!("Unknown format ({}B)", bytes.len())),
    }
}

async fn decode_poster(bytes: Bytes, size: (u16, u16)) -> Result<HalfBlockImage, String> {
    tokio::task::spawn_blocking(move || {
        let image = decode_image_bytes(&bytes)?;
        Ok(HalfBlockImage::from_image(&image, size.0, size.1))
    })
    .await
    .map_err(|e| format!("Decode task failed: {}", e))?
}

async fn load_poster(
    client: &reqwest::Client,
    url: &str,
    size: (u16, u16),
    disk: Option<&PosterDiskCache>,
) -> Result<HalfBlockImage, String> {
    if let Some(disk) = disk {
        if let Some(data) = disk.load(url).await {
            match decode_poster(Bytes::from(data), size).await {
                Ok(poster) => {
                    debug!("Poster disk cache hit: {}", url);
                    return Ok(poster);
                }
                Err(e) => debug!("Discarding unreadable cached poster {}: {}", url, e),
            }
        }
    }

    let bytes = fetch_poster_bytes(client, url).await?;
    if let Some(disk) = disk {
        if let Err(e) = disk.save(url, &bytes).await {
            warn!("Failed to cache poster {}: {}", url, e);
        }
    }
    decode_poster(bytes, size).await
}

/// Spawn a poster load; the result arrives on `tx`
pub fn spawn_poster_load(
    client: reqwest::Client,
    url: String,
    size: (u16, u16),
    disk: Option<PosterDiskCache>,
    tx: mpsc::UnboundedSender<ImageLoadResult>,
) {
    tokio::spawn(async move {
        let result = match load_poster(&client, &url, size, disk.as_ref()).await {
            Ok(poster) => ImageLoadResult::Success { url, poster },
            Err(error) => {
                warn!("Poster load failed for {}: {}", url, error);
                ImageLoadResult::Failure { url, error }
            }
        };
        // Receiver is gone once the UI has exited
        let _ = tx.send(result);
    });
}
