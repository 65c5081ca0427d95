//! Position decoding for NMEA 0183 sentences

use nmea::{Nmea, SentenceType};
use serde::{Deserialize, Serialize};

/// A position fix taken from a GGA, RMC or GLL sentence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPosition {
    /// Degrees, north positive
    pub latitude: f64,
    /// Degrees, east positive
    pub longitude: f64,
    /// Metres above mean sea level, last value seen in a GGA sentence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f32>,
}

/// Stateful decoder over a sequence of framed sentences
pub struct NmeaDecoder {
    parser: Nmea,
}

impl Default for NmeaDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl NmeaDecoder {
    /// Create a decoder with no prior fix
    pub fn new() -> Self {
        Self {
            parser: Nmea::default(),
        }
    }

    /// Decode a framed sentence; `None` unless it is a fix sentence with a position
    pub fn decode(&mut self, sentence: &str) -> Option<GpsPosition> {
        let text = sentence.trim();
        if text.is_empty() {
            return None;
        }

        let sentence_type = match self.parser.parse(text) {
            Ok(sentence_type) => sentence_type,
            Err(err) => {
                log::debug!("Skipping undecodable sentence {:?}: {:?}", text, err);
                return None;
            }
        };

        match sentence_type {
            SentenceType::GGA | SentenceType::RMC | SentenceType::GLL => Some(GpsPosition {
                latitude: self.parser.latitude?,
                longitude: self.parser.longitude?,
                altitude: self.parser.altitude,
            }),
            _ => None,
        }
    }
}
