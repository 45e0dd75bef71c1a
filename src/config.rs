use std::env;
use std::path::PathBuf;

use url::Url;

use crate::models::trip::Language;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const FONT_PATH: &str = "fonts/DejaVuSans.ttf";
const DEVANAGARI_FONT_PATH: &str = "fonts/NotoSansDevanagari-Regular.ttf";
const BENGALI_FONT_PATH: &str = "fonts/NotoSansBengali-Regular.ttf";
const TELUGU_FONT_PATH: &str = "fonts/NotoSansTelugu-Regular.ttf";

/// Faces for the Indic output languages. Each is tried before the base font
/// when exporting a plan written in that language.
#[derive(Debug, Clone)]
pub struct ScriptFonts {
    pub devanagari: PathBuf,
    pub bengali: PathBuf,
    pub telugu: PathBuf,
}

impl ScriptFonts {
    fn from_env() -> Self {
        Self {
            devanagari: path_var("ITINERARY_DEVANAGARI_FONT_PATH", DEVANAGARI_FONT_PATH),
            bengali: path_var("ITINERARY_BENGALI_FONT_PATH", BENGALI_FONT_PATH),
            telugu: path_var("ITINERARY_TELUGU_FONT_PATH", TELUGU_FONT_PATH),
        }
    }

    pub fn for_language(&self, language: Language) -> Option<&PathBuf> {
        match language {
            Language::English => None,
            Language::Hindi => Some(&self.devanagari),
            Language::Bengali => Some(&self.bengali),
            Language::Telugu => Some(&self.telugu),
        }
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` is allowed at startup; generation then fails with MissingCredential.
    pub api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Base face; covers Latin text and the document chrome.
    pub font_path: PathBuf,
    pub script_fonts: ScriptFonts,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| PORT.to_string())
            .parse()
            .unwrap_or(PORT);

        let api_key = env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let gemini_model = env::var("GEMINI_MODEL").unwrap_or_else(|_| GEMINI_MODEL.to_string());

        let gemini_base_url = match env::var("GEMINI_BASE_URL") {
            Ok(raw) if Url::parse(&raw).is_ok() => raw.trim_end_matches('/').to_string(),
            Ok(raw) => {
                log::warn!("Ignoring invalid GEMINI_BASE_URL '{}', using default", raw);
                GEMINI_BASE_URL.to_string()
            }
            Err(_) => GEMINI_BASE_URL.to_string(),
        };

        let font_path = path_var("ITINERARY_FONT_PATH", FONT_PATH);

        Self {
            host,
            port,
            api_key,
            gemini_model,
            gemini_base_url,
            font_path,
            script_fonts: ScriptFonts::from_env(),
        }
    }

    /// Font files for a plan in `language`, most specific first.
    pub fn font_paths(&self, language: Language) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .script_fonts
            .for_language(language)
            .cloned()
            .into_iter()
            .collect();
        paths.push(self.font_path.clone());
        paths
    }

    /// Masked credential for health output.
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            if chars.len() > 8 {
                let head: String = chars[..4].iter().collect();
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("{}***{}", head, tail)
            } else {
                "***".to_string()
            }
        })
    }
}
