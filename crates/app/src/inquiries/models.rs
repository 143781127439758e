//! Inquiry Models

use ihram::locale::Locale;
use serde::Serialize;

use crate::validation::{self, ValidationError};

/// Mosque-supply request form, as entered.
#[derive(Debug, Clone, Default)]
pub struct MosqueSupplyForm {
    /// Name of the mosque.
    pub mosque_name: String,

    /// Person making the request.
    pub contact_name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone.
    pub phone: Option<String>,

    /// City the mosque is in.
    pub city: String,

    /// Country the mosque is in.
    pub country: String,

    /// Number of Ihram sets requested.
    pub quantity: i64,

    /// Anything else the mosque wants to say.
    pub message: Option<String>,

    /// Language the form was filled in.
    pub locale: Locale,
}

/// A validated mosque-supply request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MosqueSupplyRequest {
    /// Name of the mosque.
    pub mosque_name: String,

    /// Person making the request.
    pub contact_name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone.
    pub phone: Option<String>,

    /// City the mosque is in.
    pub city: String,

    /// Country the mosque is in.
    pub country: String,

    /// Number of Ihram sets requested.
    pub quantity: u32,

    /// Anything else the mosque wants to say.
    pub message: Option<String>,

    /// Language the form was filled in.
    pub locale: Locale,
}

impl MosqueSupplyForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<MosqueSupplyRequest, ValidationError> {
        Ok(MosqueSupplyRequest {
            mosque_name: validation::required("mosque name", &self.mosque_name)?,
            contact_name: validation::required("contact name", &self.contact_name)?,
            email: validation::email("email", &self.email)?,
            phone: validation::optional(self.phone.as_deref()),
            city: validation::required("city", &self.city)?,
            country: validation::required("country", &self.country)?,
            quantity: validation::positive("quantity", self.quantity)?,
            message: validation::optional(self.message.as_deref()),
            locale: self.locale,
        })
    }
}

/// Partner or wholesale inquiry form, as entered.
#[derive(Debug, Clone, Default)]
pub struct PartnerInquiryForm {
    /// Organisation name.
    pub organisation: String,

    /// Person making the inquiry.
    pub contact_name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone.
    pub phone: Option<String>,

    /// Country the partner operates in.
    pub country: String,

    /// Rough volume the partner has in mind.
    pub estimated_quantity: Option<i64>,

    /// The inquiry itself.
    pub message: String,

    /// Language the form was filled in.
    pub locale: Locale,
}

/// A validated partner inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerInquiry {
    /// Organisation name.
    pub organisation: String,

    /// Person making the inquiry.
    pub contact_name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone.
    pub phone: Option<String>,

    /// Country the partner operates in.
    pub country: String,

    /// Rough volume the partner has in mind.
    pub estimated_quantity: Option<u32>,

    /// The inquiry itself.
    pub message: String,

    /// Language the form was filled in.
    pub locale: Locale,
}

impl PartnerInquiryForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<PartnerInquiry, ValidationError> {
        Ok(PartnerInquiry {
            organisation: validation::required("organisation", &self.organisation)?,
            contact_name: validation::required("contact name", &self.contact_name)?,
            email: validation::email("email", &self.email)?,
            phone: validation::optional(self.phone.as_deref()),
            country: validation::required("country", &self.country)?,
            estimated_quantity: self
                .estimated_quantity
                .map(|quantity| validation::positive("estimated quantity", quantity))
                .transpose()?,
            message: validation::required("message", &self.message)?,
            locale: self.locale,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn mosque_form() -> MosqueSupplyForm {
        MosqueSupplyForm {
            mosque_name: " Masjid an-Nur ".to_owned(),
            contact_name: "Ibrahim Hassan".to_owned(),
            email: "imam@masjid.example".to_owned(),
            phone: Some(" ".to_owned()),
            city: "Malmö".to_owned(),
            country: "SE".to_owned(),
            quantity: 40,
            message: None,
            locale: Locale::Sv,
        }
    }

    #[test]
    fn complete_mosque_form_is_trimmed() -> TestResult {
        let request = mosque_form().validate()?;

        assert_eq!(request.mosque_name, "Masjid an-Nur");
        assert_eq!(request.phone, None);
        assert_eq!(request.quantity, 40);

        Ok(())
    }

    #[test]
    fn mosque_form_needs_a_positive_quantity() {
        let form = MosqueSupplyForm {
            quantity: 0,
            ..mosque_form()
        };

        assert_eq!(
            form.validate(),
            Err(ValidationError::InvalidQuantity("quantity"))
        );
    }

    #[test]
    fn partner_form_requires_a_message_and_valid_email() {
        let form = PartnerInquiryForm {
            organisation: "Hajj Travel AB".to_owned(),
            contact_name: "Sara Lind".to_owned(),
            email: "sara.travel.example".to_owned(),
            country: "SE".to_owned(),
            message: "Wholesale pricing for 500 sets?".to_owned(),
            ..PartnerInquiryForm::default()
        };

        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail("email")));

        let form = PartnerInquiryForm {
            email: "sara@travel.example".to_owned(),
            message: "  ".to_owned(),
            ..form
        };

        assert_eq!(form.validate(), Err(ValidationError::Required("message")));
    }
}
