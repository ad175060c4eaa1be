//! One service per collection. Services own validation, uniqueness checks,
//! persistence and the domain events emitted after each committed write.

use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Select};
use validator::ValidationError;

use crate::errors::ServiceError;

pub mod almacenes;
pub mod formas_pago;
pub mod historial_proveedor;
pub mod productos_sage;
pub mod recetas;
pub mod stock;
pub mod vendedores;

/// One page of a listing plus the total number of matching rows.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// 1-based page request. Construction keeps both values at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Row offset of the first item, `None` when it does not fit a SQL `OFFSET`.
    pub fn offset(&self) -> Option<u64> {
        (self.page - 1)
            .checked_mul(self.per_page)
            .filter(|offset| i64::try_from(*offset).is_ok())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

pub(crate) async fn fetch_page<E>(
    select: Select<E>,
    db: &DatabaseConnection,
    request: PageRequest,
) -> Result<Page<E::Model>, ServiceError>
where
    E: EntityTrait,
    E::Model: Sync,
{
    if request.offset().is_none() {
        return Err(ServiceError::InvalidInput(format!(
            "page {} is out of range for perPage {}",
            request.page, request.per_page
        )));
    }

    let paginator = select.paginate(db, request.per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(request.page - 1).await?;
    Ok(Page { items, total })
}

/// Trimmed copy of a required string.
pub(crate) fn required(value: &str) -> String {
    value.trim().to_string()
}

/// Trimmed optional string; blank becomes `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Optional email: blank means absent, anything else must be an address.
pub fn email_or_blank(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || validator::validate_email(trimmed) {
        return Ok(());
    }
    let mut err = ValidationError::new("email");
    err.message = Some("email is not valid".into());
    Err(err)
}

pub fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut err = ValidationError::new("positive");
        err.message = Some("must be greater than zero".into());
        return Err(err);
    }
    Ok(())
}

pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("must not be negative".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("   ", false)]
    #[case("\t\n", false)]
    #[case("ALM-01", true)]
    #[case("  x ", true)]
    fn not_blank_cases(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(not_blank(input).is_ok(), ok);
    }

    #[rstest]
    #[case(Decimal::new(-1, 2), false, false)]
    #[case(Decimal::ZERO, false, true)]
    #[case(Decimal::new(25, 2), true, true)]
    fn decimal_bounds(#[case] value: Decimal, #[case] pos: bool, #[case] non_neg: bool) {
        assert_eq!(positive(&value).is_ok(), pos);
        assert_eq!(non_negative(&value).is_ok(), non_neg);
    }

    #[rstest]
    #[case("", true)]
    #[case("   ", true)]
    #[case(" ana@carniceria.es ", true)]
    #[case("no-es-un-email", false)]
    fn email_or_blank_cases(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(email_or_blank(input).is_ok(), ok);
    }

    #[test]
    fn optional_drops_blank_values() {
        assert_eq!(optional(Some("  ".into())), None);
        assert_eq!(optional(Some(" Calle 1 ".into())).as_deref(), Some("Calle 1"));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn page_request_never_goes_below_one() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, per_page: 1 });
    }

    #[rstest]
    #[case(1, 20, Some(0))]
    #[case(3, 20, Some(40))]
    #[case(u64::MAX, 20, None)]
    #[case(922_337_203_685_477_581, 20, None)]
    fn page_offset_stays_within_sql_range(
        #[case] page: u64,
        #[case] per_page: u64,
        #[case] expected: Option<u64>,
    ) {
        assert_eq!(PageRequest::new(page, per_page).offset(), expected);
    }
}
