//! Scene records that OBJ mesh loaders skip.
//!
//! Meshes are read by `tobj`, which ignores the two extension records and
//! does not report material names it cannot resolve. This pass reads, in
//! file order, everything that binds to the current material:
//!
//! - `mtllib file`
//! - `usemtl name`
//! - `S x y z r`: a sphere
//! - `P x y z r g b`: a point light with intensity `(r, g, b)`
//!
//! It also rejects faces with fewer than three corners, so errors in those
//! come with a line number.

use prism_math::DVec3;

use crate::error::{SceneError, SceneResult};

/// A scene record with its 1-based line number.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneRecord {
    MaterialLibrary(String),
    UseMaterial(String),
    Sphere { center: DVec3, radius: f64 },
    Light { position: DVec3, intensity: DVec3 },
}

/// Parse a single real number, reporting the line on failure.
pub(crate) fn parse_real(token: &str, line: usize) -> SceneResult<f64> {
    token.parse::<f64>().map_err(|_| SceneError::InvalidNumber {
        line,
        value: token.to_string(),
    })
}

/// Parse exactly `N` leading reals from `args`.
pub(crate) fn parse_reals<const N: usize>(
    keyword: &str,
    args: &[&str],
    line: usize,
) -> SceneResult<[f64; N]> {
    if args.len() < N {
        return Err(SceneError::Parse {
            line,
            message: format!("'{}' expects {} numbers, found {}", keyword, N, args.len()),
        });
    }
    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(args) {
        *slot = parse_real(token, line)?;
    }
    Ok(out)
}

/// Everything after the keyword, trimmed. File names may contain spaces.
fn rest_of_line<'a>(content: &'a str, keyword: &str) -> &'a str {
    content.trim_start()[keyword.len()..].trim()
}

fn parse_line(raw: &str, line: usize) -> SceneResult<Option<SceneRecord>> {
    let content = match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let mut tokens = content.split_whitespace();
    let keyword = match tokens.next() {
        Some(k) => k,
        None => return Ok(None),
    };
    let args: Vec<&str> = tokens.collect();

    let record = match keyword {
        "f" if args.len() < 3 => {
            return Err(SceneError::DegenerateFace {
                line,
                count: args.len(),
            })
        }
        "mtllib" | "usemtl" => {
            let value = rest_of_line(content, keyword);
            if value.is_empty() {
                return Err(SceneError::Parse {
                    line,
                    message: format!("'{}' without a name", keyword),
                });
            }
            if keyword == "mtllib" {
                SceneRecord::MaterialLibrary(value.to_string())
            } else {
                SceneRecord::UseMaterial(value.to_string())
            }
        }
        "S" => {
            let [x, y, z, r] = parse_reals::<4>(keyword, &args, line)?;
            SceneRecord::Sphere {
                center: DVec3::new(x, y, z),
                radius: r,
            }
        }
        "P" => {
            let [x, y, z, r, g, b] = parse_reals::<6>(keyword, &args, line)?;
            SceneRecord::Light {
                position: DVec3::new(x, y, z),
                intensity: DVec3::new(r, g, b),
            }
        }
        _ => return Ok(None),
    };
    Ok(Some(record))
}

/// Scan OBJ content for scene records, tagged with their line numbers.
pub fn parse_records(content: &str) -> SceneResult<Vec<(usize, SceneRecord)>> {
    let mut records = Vec::new();
    for (i, raw) in content.lines().enumerate() {
        if let Some(record) = parse_line(raw, i + 1)? {
            records.push((i + 1, record));
        }
    }
    Ok(records)
}
