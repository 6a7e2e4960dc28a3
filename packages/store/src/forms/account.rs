//! Allotment, profile and authentication forms.

use super::{present, required_number, required_text, FieldErrors, Range};
use crate::models::{AllotmentPayload, LoginRequest, ProfileUpdate, RegisterRequest};

const PLOT_SIZE: Range = Range::new(1.0, 100.0);
const POSTCODE_LEN: (usize, usize) = (5, 8);
const FIRST_NAME_LEN: (usize, usize) = (2, 50);
const PASSWORD_LEN: (usize, usize) = (8, 30);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AllotmentDraft {
    pub postal_code: String,
    pub width_meters: String,
    pub length_meters: String,
}

pub fn validate_allotment(draft: &AllotmentDraft) -> Result<AllotmentPayload, FieldErrors> {
    let mut errors = FieldErrors::new();

    let postal_code = required_text(&mut errors, "postal_code", "Postal code", &draft.postal_code);
    if !postal_code.is_empty() {
        let len = postal_code.chars().count();
        if len < POSTCODE_LEN.0 || len > POSTCODE_LEN.1 {
            errors.insert(
                "postal_code",
                format!(
                    "Postal code must be between {} and {} characters",
                    POSTCODE_LEN.0, POSTCODE_LEN.1
                ),
            );
        } else if !postal_code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ')
        {
            errors.insert(
                "postal_code",
                "Postal code may only contain letters, numbers and spaces",
            );
        }
    }

    let width =
        required_number(&mut errors, "width_meters", "Width", &draft.width_meters, PLOT_SIZE);
    let length =
        required_number(&mut errors, "length_meters", "Length", &draft.length_meters, PLOT_SIZE);

    errors.finish(AllotmentPayload {
        allotment_postal_zip_code: postal_code.to_uppercase(),
        allotment_width_meters: width,
        allotment_length_meters: length,
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileDraft {
    pub first_name: String,
    pub country_code: String,
}

fn check_first_name(errors: &mut FieldErrors, raw: &str) -> String {
    let name = required_text(errors, "first_name", "First name", raw);
    if !name.is_empty() {
        let len = name.chars().count();
        if len < FIRST_NAME_LEN.0 {
            errors.insert(
                "first_name",
                format!("First name must be at least {} characters", FIRST_NAME_LEN.0),
            );
        } else if len > FIRST_NAME_LEN.1 {
            errors.insert(
                "first_name",
                format!("First name must be at most {} characters", FIRST_NAME_LEN.1),
            );
        }
    }
    name
}

fn check_country_code(errors: &mut FieldErrors, raw: &str) -> String {
    let code = required_text(errors, "country_code", "Country code", raw);
    if !code.is_empty() && (code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic())) {
        errors.insert("country_code", "Country code must be two letters");
    }
    code.to_ascii_uppercase()
}

pub fn validate_profile(draft: &ProfileDraft) -> Result<ProfileUpdate, FieldErrors> {
    let mut errors = FieldErrors::new();
    let user_first_name = check_first_name(&mut errors, &draft.first_name);
    let user_country_code = check_country_code(&mut errors, &draft.country_code);
    errors.finish(ProfileUpdate {
        user_first_name,
        user_country_code,
    })
}

fn check_email(errors: &mut FieldErrors, raw: &str) -> String {
    let email = required_text(errors, "email", "Email", raw);
    if !email.is_empty() && !looks_like_email(&email) {
        errors.insert("email", "Please enter a valid email address");
    }
    email.to_lowercase()
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

fn check_new_password(errors: &mut FieldErrors, password: &str, confirm: &str) {
    let len = password.chars().count();
    if password.is_empty() {
        errors.insert("password", "Password is required");
    } else if len < PASSWORD_LEN.0 {
        errors.insert(
            "password",
            format!("Password must be at least {} characters", PASSWORD_LEN.0),
        );
    } else if len > PASSWORD_LEN.1 {
        errors.insert(
            "password",
            format!("Password must be at most {} characters", PASSWORD_LEN.1),
        );
    } else if !(password.chars().any(|c| c.is_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit()))
    {
        errors.insert(
            "password",
            "Password must contain at least one letter and one number",
        );
    }
    if present(confirm).is_none() {
        errors.insert("password_confirm", "Please confirm your password");
    } else if password != confirm {
        errors.insert("password_confirm", "Passwords do not match");
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

pub fn validate_login(draft: &LoginDraft) -> Result<LoginRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    let user_email = check_email(&mut errors, &draft.email);
    if draft.password.is_empty() {
        errors.insert("password", "Password is required");
    }
    errors.finish(LoginRequest {
        user_email,
        user_password: draft.password.clone(),
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterDraft {
    pub email: String,
    pub first_name: String,
    pub country_code: String,
    pub password: String,
    pub password_confirm: String,
}

pub fn validate_register(draft: &RegisterDraft) -> Result<RegisterRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    let user_email = check_email(&mut errors, &draft.email);
    let user_first_name = check_first_name(&mut errors, &draft.first_name);
    let user_country_code = check_country_code(&mut errors, &draft.country_code);
    check_new_password(&mut errors, &draft.password, &draft.password_confirm);
    errors.finish(RegisterRequest {
        user_email,
        user_password: draft.password.clone(),
        user_first_name,
        user_country_code,
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PasswordResetDraft {
    pub password: String,
    pub password_confirm: String,
}

pub fn validate_password_reset(draft: &PasswordResetDraft) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_new_password(&mut errors, &draft.password, &draft.password_confirm);
    errors.finish(draft.password.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allotment_normalizes_postcode() {
        let out = validate_allotment(&AllotmentDraft {
            postal_code: " sw1a 1aa ".into(),
            width_meters: "10".into(),
            length_meters: "20.5".into(),
        })
        .unwrap();
        assert_eq!(out.allotment_postal_zip_code, "SW1A 1AA");
        assert_eq!(out.allotment_length_meters, 20.5);
    }

    #[test]
    fn allotment_reports_every_field() {
        let errors = validate_allotment(&AllotmentDraft {
            postal_code: "AB".into(),
            width_meters: "0".into(),
            length_meters: "".into(),
        })
        .unwrap_err();
        assert_eq!(
            errors.get("postal_code"),
            Some("Postal code must be between 5 and 8 characters")
        );
        assert_eq!(errors.get("width_meters"), Some("Width must be between 1 and 100"));
        assert_eq!(errors.get("length_meters"), Some("Length is required"));
    }

    #[test]
    fn allotment_rejects_symbols_in_postcode() {
        let errors = validate_allotment(&AllotmentDraft {
            postal_code: "AB-12C".into(),
            width_meters: "5".into(),
            length_meters: "5".into(),
        })
        .unwrap_err();
        assert!(errors.contains("postal_code"));
    }

    #[test]
    fn profile_uppercases_country() {
        let out = validate_profile(&ProfileDraft {
            first_name: "Sam".into(),
            country_code: "gb".into(),
        })
        .unwrap();
        assert_eq!(out.user_country_code, "GB");
    }

    #[test]
    fn profile_rejects_short_name_and_bad_country() {
        let errors = validate_profile(&ProfileDraft {
            first_name: "S".into(),
            country_code: "GBR".into(),
        })
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn login_requires_wellformed_email() {
        let errors = validate_login(&LoginDraft {
            email: "not-an-email".into(),
            password: "".into(),
        })
        .unwrap_err();
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(errors.get("password"), Some("Password is required"));

        let ok = validate_login(&LoginDraft {
            email: " Grower@Example.com ".into(),
            password: "x".into(),
        })
        .unwrap();
        assert_eq!(ok.user_email, "grower@example.com");
    }

    #[test]
    fn register_password_rules() {
        let mut draft = RegisterDraft {
            email: "grower@example.com".into(),
            first_name: "Alex".into(),
            country_code: "GB".into(),
            password: "password".into(),
            password_confirm: "password".into(),
        };
        assert_eq!(
            validate_register(&draft).unwrap_err().get("password"),
            Some("Password must contain at least one letter and one number")
        );

        draft.password = "password1".into();
        assert_eq!(
            validate_register(&draft).unwrap_err().get("password_confirm"),
            Some("Passwords do not match")
        );

        draft.password_confirm = "password1".into();
        assert!(validate_register(&draft).is_ok());
    }

    #[test]
    fn password_reset_length_bounds() {
        let short = PasswordResetDraft {
            password: "abc1".into(),
            password_confirm: "abc1".into(),
        };
        assert!(validate_password_reset(&short).unwrap_err().contains("password"));

        let long = "a1".repeat(16);
        let too_long = PasswordResetDraft {
            password: long.clone(),
            password_confirm: long,
        };
        assert!(validate_password_reset(&too_long).is_err());
    }
}
