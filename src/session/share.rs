use std::collections::HashMap;

use crate::{
    foundation::{
        color::Color,
        core::Hue,
        error::{FukuwaraiError, FukuwaraiResult},
    },
    scene::{
        model::Scene,
        part::{LiveState, Part, PartId},
        transform::{Origin, Transform},
    },
    session::config::ShareFormat,
};

const STROKE: &str = "stroke";
const TRANSFORM: &str = "transform";
const TRANSFORM_ORIGIN: &str = "transform-origin";
const HUE: &str = "hue";

fn param_key(id: PartId, attr: &str) -> String {
    format!("{}:{attr}", id.key())
}

/// Scene and background hue reconstructed from a share link.
#[derive(Clone, Debug, PartialEq)]
pub struct RestoredScene {
    /// Background hue.
    pub hue: Hue,
    /// Every standard part, Frozen at its restored placement.
    pub scene: Scene,
    /// Encoding detected in the link.
    pub format: ShareFormat,
}

/// Append the restorable attributes of every part plus `hue` to `base_url`.
///
/// Parts that never animated carry no placement parameters; absent strokes are omitted.
pub fn encode_share_link(
    base_url: &str,
    scene: &Scene,
    hue: Hue,
    format: ShareFormat,
) -> FukuwaraiResult<String> {
    let mut url = url::Url::parse(base_url)
        .map_err(|e| FukuwaraiError::validation(format!("share base url: {e}")))?;
    {
        let mut q = url.query_pairs_mut();
        for part in scene.parts() {
            let id = part.id();
            if let Some(stroke) = part.stroke().filter(|s| !s.is_empty()) {
                q.append_pair(&param_key(id, STROKE), stroke);
            }
            if part.live() == LiveState::Idle {
                continue;
            }
            let transform = match format {
                ShareFormat::Style => part.transform().to_style(),
                ShareFormat::Attribute => part.transform().to_attribute(),
            };
            q.append_pair(&param_key(id, TRANSFORM), &transform);
            q.append_pair(&param_key(id, TRANSFORM_ORIGIN), &part.origin().to_value());
        }
        q.append_pair(HUE, &hue.to_string());
    }
    Ok(url.into())
}

/// Current-format links escape the commas inside transform arguments; legacy links have none.
fn detect_format(raw_query: &str) -> ShareFormat {
    let escaped_comma = raw_query.split('&').any(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        let key_is_transform = url::form_urlencoded::parse(k.as_bytes())
            .next()
            .is_some_and(|(k, _)| k.ends_with(&format!(":{TRANSFORM}")));
        key_is_transform && v.to_ascii_uppercase().contains("%2C")
    });
    if escaped_comma {
        ShareFormat::Style
    } else {
        ShareFormat::Attribute
    }
}

fn parse_hue(v: &str) -> Option<Hue> {
    let v = v.trim();
    v.parse::<i64>()
        .ok()
        .or_else(|| {
            v.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.round() as i64)
        })
        .map(Hue::new)
}

/// Rebuild a Frozen scene from a share link.
///
/// Only a string that is not a URL at all is an error. Each attribute restores independently: a
/// missing or malformed value leaves that attribute at its neutral state.
#[tracing::instrument]
pub fn decode_share_link(link: &str) -> FukuwaraiResult<RestoredScene> {
    let link = link.trim();
    match url::Url::parse(link) {
        Ok(url) => Ok(decode_share_query(url.query().unwrap_or(""))),
        Err(_) if link.starts_with('?') || link.contains('=') => {
            Ok(decode_share_query(link.trim_start_matches('?')))
        }
        Err(e) => Err(FukuwaraiError::restore(format!("share link: {e}"))),
    }
}

/// Rebuild a Frozen scene from the raw (still percent-encoded) query string of a share link.
pub fn decode_share_query(raw_query: &str) -> RestoredScene {
    let format = detect_format(raw_query);
    let params: HashMap<String, String> = url::form_urlencoded::parse(raw_query.as_bytes())
        .into_owned()
        .collect();

    let hue = match params.get(HUE) {
        Some(v) => parse_hue(v).unwrap_or_else(|| {
            tracing::warn!(value = %v, "invalid hue in share link");
            Hue::default()
        }),
        None => Hue::default(),
    };

    let parts = PartId::ALL
        .into_iter()
        .map(|id| {
            let transform = params
                .get(&param_key(id, TRANSFORM))
                .and_then(|v| {
                    let parsed = match format {
                        ShareFormat::Style => Transform::parse_style(v),
                        ShareFormat::Attribute => Transform::parse_attribute(v),
                    };
                    if parsed.is_none() {
                        tracing::warn!(part = %id, value = %v, "transform not restored");
                    }
                    parsed
                })
                .unwrap_or(Transform::IDENTITY);
            let origin = params
                .get(&param_key(id, TRANSFORM_ORIGIN))
                .and_then(|v| {
                    let parsed = Origin::parse(v);
                    if parsed.is_none() {
                        tracing::warn!(part = %id, value = %v, "transform-origin not restored");
                    }
                    parsed
                })
                .unwrap_or(Origin::CENTER);

            let mut part = Part::frozen(id, transform, origin);
            part.stroke = params
                .get(&param_key(id, STROKE))
                .filter(|s| !s.is_empty())
                .and_then(|v| match Color::parse_css(v) {
                    Ok(_) => Some(v.clone()),
                    Err(e) => {
                        tracing::warn!(part = %id, value = %v, error = %e, "stroke not restored");
                        None
                    }
                });
            part
        })
        .collect();

    tracing::debug!(?format, hue = hue.degrees(), "restored share link");
    RestoredScene {
        hue,
        scene: Scene::from_parts(parts),
        format,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/share.rs"]
mod tests;
