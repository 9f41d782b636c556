//! Shareable referral links.

/// Build the referral URL for `referral_code` under `base_url`.
///
/// The code is an opaque identifier already stored on the consultant's
/// profile; it is interpolated as-is.
pub fn referral_link(base_url: &str, referral_code: &str) -> String {
  format!("{}/r/{referral_code}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn interpolates_code() {
    assert_eq!(
      referral_link("https://example.supabase.co/functions/v1/referral-handler", "AB12CD"),
      "https://example.supabase.co/functions/v1/referral-handler/r/AB12CD"
    );
  }

  #[test]
  fn trailing_slash_on_base_is_ignored() {
    assert_eq!(referral_link("https://indica.test/", "x"), "https://indica.test/r/x");
  }
}
