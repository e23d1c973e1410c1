//! MIME type registry and Accept/Content-Type negotiation.

use std::fmt;

use log::debug;

/// The closed set of content types the adapters read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    FormUrlEncoded,
    Json,
    ApplicationXml,
    TextXml,
}

impl MimeType {
    /// Registry order. Ties that JSON is not part of resolve to the
    /// earliest entry.
    pub const SUPPORTED: [MimeType; 4] = [
        MimeType::FormUrlEncoded,
        MimeType::Json,
        MimeType::ApplicationXml,
        MimeType::TextXml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::FormUrlEncoded => "application/x-www-form-urlencoded",
            MimeType::Json => "application/json",
            MimeType::ApplicationXml => "application/xml",
            MimeType::TextXml => "text/xml",
        }
    }

    /// Exact, case-sensitive registry lookup.
    pub fn from_registry(s: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|m| m.as_str() == s)
    }

    pub fn is_xml(&self) -> bool {
        matches!(self, MimeType::ApplicationXml | MimeType::TextXml)
    }

    /// Comma-separated registry listing used in error messages.
    pub fn supported_list() -> String {
        Self::SUPPORTED
            .iter()
            .map(MimeType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn type_and_subtype(&self) -> (&'static str, &'static str) {
        let full = self.as_str();
        // Registry entries always contain a slash
        full.split_once('/').unwrap_or((full, ""))
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an Accept (or Content-Type) expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    pub main_type: String,
    pub subtype: String,
    pub params: Vec<(String, String)>,
    pub quality: f32,
}

impl MediaRange {
    /// Parse a single media range such as `application/xml; q=0.5`.
    ///
    /// A bare `*` is read as `*/*`. A missing, malformed or out-of-range
    /// `q` parameter counts as 1.
    pub fn parse(s: &str) -> Self {
        let mut parts = s.split(';');
        let full = parts.next().unwrap_or("").trim();
        let full = if full == "*" { "*/*" } else { full };
        let (main_type, subtype) = full.split_once('/').unwrap_or((full, ""));

        let mut quality = 1.0;
        let mut params = Vec::new();
        for param in parts {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if key == "q" {
                quality = match value.parse::<f32>() {
                    Ok(q) if (0.0..=1.0).contains(&q) => q,
                    _ => 1.0,
                };
            } else {
                params.push((key.to_string(), value.to_string()));
            }
        }

        Self {
            main_type: main_type.trim().to_string(),
            subtype: subtype.trim().to_string(),
            params,
            quality,
        }
    }

    /// Specificity of this range against a concrete type, or `None` when
    /// the range does not cover it.
    fn fitness(&self, target: MimeType) -> Option<u32> {
        let (main_type, subtype) = target.type_and_subtype();
        let type_match = self.main_type == main_type || self.main_type == "*";
        let subtype_match = self.subtype == subtype || self.subtype == "*";
        if !(type_match && subtype_match) {
            return None;
        }
        // Registry entries carry no parameters, so parameters never add
        let mut fitness = 0;
        if self.main_type == main_type {
            fitness += 100;
        }
        if self.subtype == subtype {
            fitness += 10;
        }
        Some(fitness)
    }
}

/// Quality and fitness of the best range in `ranges` covering `target`.
fn quality_and_fitness(target: MimeType, ranges: &[MediaRange]) -> (f32, u32) {
    let mut best: Option<(u32, f32)> = None;
    for range in ranges {
        if let Some(fitness) = range.fitness(target) {
            if best.map_or(true, |(f, _)| fitness > f) {
                best = Some((fitness, range.quality));
            }
        }
    }
    best.map_or((0.0, 0), |(fitness, quality)| (quality, fitness))
}

/// Pick the best supported type for a preference expression.
///
/// Candidates rank by quality, then fitness. Remaining ties prefer JSON,
/// then registry order. Returns `None` when nothing is acceptable.
pub fn best_match(header: &str) -> Option<MimeType> {
    let ranges: Vec<MediaRange> = header.split(',').map(MediaRange::parse).collect();

    let mut best: Option<(MimeType, f32, u32)> = None;
    for candidate in MimeType::SUPPORTED {
        let (quality, fitness) = quality_and_fitness(candidate, &ranges);
        if quality <= 0.0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((current, q, f)) => {
                quality > q
                    || (quality == q && fitness > f)
                    || (quality == q && fitness == f && candidate == MimeType::Json && current != MimeType::Json)
            }
        };
        if better {
            best = Some((candidate, quality, fitness));
        }
    }

    best.map(|(mime, _, _)| mime)
}

/// Negotiate a MIME type from an Accept or Content-Type header value.
///
/// An absent value and the bare wildcard `*/*` both mean JSON.
pub fn select_mime_type(header: Option<&str>) -> Option<MimeType> {
    let header = match header.map(str::trim) {
        None | Some("") | Some("*/*") => MimeType::Json.as_str(),
        Some(h) => h,
    };
    let selected = best_match(header);
    debug!("negotiated {header:?} to {selected:?}");
    selected
}
