use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    // Email pattern - RFC 5322 simplified, anchored to the whole value
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9-]+(\.[A-Z0-9-]+)*\.[A-Z]{2,}$").unwrap();
}

const MAX_PHONE_LEN: usize = 14;

/// Listing payload submitted by the public.
///
/// Unknown fields are rejected at decode time. Missing fields decode as empty
/// so that `validate` can report every problem at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingSubmission {
    pub name: String,
    #[serde(rename = "type")]
    pub listing_type: String,
    pub tags: Vec<String>,
    pub phone: String,
    pub email: String,
    pub details: String,
    pub hours: String,
    pub url: String,
    pub address: String,
    #[serde(rename = "address_2")]
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub donate_url: String,
    pub giftcard: bool,
}

/// Every field that failed validation, by its JSON name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub fields: Vec<&'static str>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not create entry as it contained missing or invalid fields: {}",
            self.fields.join(", ")
        )
    }
}

impl std::error::Error for ValidationErrors {}

impl ListingSubmission {
    /// Check required fields and formats, collecting all offenders.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut fields = Vec::new();

        for (field, value) in [
            ("name", &self.name),
            ("type", &self.listing_type),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
        ] {
            if value.trim().is_empty() {
                fields.push(field);
            }
        }

        if self.phone.trim().is_empty() || self.phone.chars().count() > MAX_PHONE_LEN {
            fields.push("phone");
        }
        if !EMAIL_REGEX.is_match(self.email.trim()) {
            fields.push("email");
        }
        if !is_valid_url(&self.url) {
            fields.push("url");
        }
        if !is_valid_zipcode(&self.zipcode) {
            fields.push("zipcode");
        }
        if !is_valid_url(&self.donate_url) {
            fields.push("donate_url");
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { fields })
        }
    }

    /// Trim text fields and reduce tags to an ordered set of non-empty values.
    pub fn normalized(mut self) -> Self {
        for value in [
            &mut self.name,
            &mut self.listing_type,
            &mut self.phone,
            &mut self.email,
            &mut self.url,
            &mut self.address,
            &mut self.address2,
            &mut self.city,
            &mut self.state,
            &mut self.zipcode,
            &mut self.donate_url,
        ] {
            *value = value.trim().to_string();
        }

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        self.tags = tags;
        self
    }

    /// Street line sent to the geocoder (`address address2`)
    pub fn street(&self) -> String {
        format!("{} {}", self.address, self.address2)
            .trim()
            .to_string()
    }
}

fn is_valid_zipcode(zipcode: &str) -> bool {
    zipcode.len() == 5 && zipcode.bytes().all(|b| b.is_ascii_digit())
}

/// Empty is allowed; anything else must be an absolute URL with a host
fn is_valid_url(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return true;
    }
    url::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
