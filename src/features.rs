use crate::error::{ConfigError, Result};

const FEATURE_ABBREV: &[(&str, &str)] = &[("albedo", "alb"), ("normal", "nrm")];

/// Replaces full feature names with abbreviations and drops repeats, keeping
/// the first occurrence of each.
pub fn normalize_features<S: AsRef<str>>(features: &[S]) -> Vec<String> {
  let mut normalized: Vec<String> = Vec::with_capacity(features.len());

  for feature in features {
    let feature = feature.as_ref();
    let feature = FEATURE_ABBREV
      .iter()
      .find(|(full, _)| *full == feature)
      .map_or(feature, |&(_, abbrev)| abbrev);

    if !normalized.iter().any(|f| f == feature) {
      normalized.push(feature.to_owned());
    }
  }

  normalized
}

/// Exactly one of `hdr` and `ldr` has to be present.
pub fn check_features(features: &[String]) -> Result<()> {
  let hdr = features.iter().any(|f| f == "hdr");
  let ldr = features.iter().any(|f| f == "ldr");

  if hdr == ldr {
    return Err(ConfigError::InvalidFeatures(features.to_vec()));
  }

  Ok(())
}

pub fn default_transfer(features: &[String]) -> &'static str {
  if features.iter().any(|f| f == "hdr") {
    "pu"
  } else {
    "srgb"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn abbreviates_and_deduplicates_in_order() {
    assert_eq!(
      normalize_features(&["albedo", "alb", "normal", "hdr"]),
      ["alb", "nrm", "hdr"]
    );
  }

  #[test]
  fn normalization_is_idempotent() {
    let once = normalize_features(&["ldr", "normal", "albedo", "nrm", "ldr"]);
    assert_eq!(normalize_features(&once), once);
  }

  #[test]
  fn accepts_exactly_one_of_hdr_and_ldr() {
    assert!(check_features(&strings(&["hdr", "alb"])).is_ok());
    assert!(check_features(&strings(&["nrm", "ldr"])).is_ok());
  }

  #[test]
  fn rejects_both_or_neither() {
    for features in [strings(&["hdr", "ldr"]), strings(&["alb", "nrm"]), vec![]] {
      let err = check_features(&features).unwrap_err();
      assert_eq!(
        err.to_string(),
        "either hdr or ldr must be specified as input feature"
      );
    }
  }

  #[test]
  fn transfer_follows_dynamic_range() {
    assert_eq!(default_transfer(&strings(&["hdr", "alb"])), "pu");
    assert_eq!(default_transfer(&strings(&["ldr"])), "srgb");
  }
}
