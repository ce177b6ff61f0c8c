use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Letters outside ASCII are allowed in every part, using the same code point ranges as
    // validator.js `isEmail` with its default options.
    static ref EMAIL_LOCAL: Regex = Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{00A1}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{00A1}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}-]+)*$"
    )
    .expect("email local-part pattern compiles");
    static ref EMAIL_DOMAIN_LABEL: Regex = Regex::new(
        r"^[A-Za-z0-9\x{00A1}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]([A-Za-z0-9\x{00A1}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}-]{0,61}[A-Za-z0-9\x{00A1}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}])?$"
    )
    .expect("email domain label pattern compiles");
    static ref EMAIL_TLD: Regex = Regex::new(
        r"^([A-Za-z\x{00A1}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]{2,}|xn--[A-Za-z0-9-]+)$"
    )
    .expect("email tld pattern compiles");
    // Indonesian cellular prefixes: Telkomsel, Indosat, XL, Axis, Smartfren, Tri.
    static ref MOBILE_ID: Regex = Regex::new(
        r"^(\+?62|0)8(1[123456789]|2[1238]|3[1238]|5[12356789]|7[78]|9[56789]|8[123456789])[\s\d]{5,11}$"
    )
    .expect("id-ID mobile pattern compiles");
}

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

/// Accepts `local@domain.tld` addresses with a dotted domain and an alphabetic TLD.
/// Non-ASCII letters are accepted in the local part, the labels and the TLD.
pub fn is_email(value: &str) -> bool {
    if value.is_empty() || value.len() > EMAIL_MAX_LEN {
        return false;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > EMAIL_LOCAL_MAX_LEN || !EMAIL_LOCAL.is_match(local) {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    EMAIL_TLD.is_match(tld) && host.split('.').all(|label| EMAIL_DOMAIN_LABEL.is_match(label))
}

/// Indonesian mobile number, local (`08…`) or international (`+628…`, `628…`) form.
pub fn is_indonesian_mobile(value: &str) -> bool {
    MOBILE_ID.is_match(value)
}
