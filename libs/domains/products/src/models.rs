use axum_helpers::Representation;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Product entity as persisted by a [`ProductStore`](crate::repository::ProductStore)
///
/// `id` is `None` until the store assigns one on first save.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
}

/// Public representation of a product.
///
/// The serialized field names are the API contract and are identical in
/// JSON, XML (`<product>` root) and YAML:
/// `id`, `nome`, `descricao`, `preco`, `quantidadeEstoque`.
///
/// Every field is optional at the decoding stage so that a missing value is
/// reported by [`Validate`] as a field error instead of a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRepresentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(rename = "nome", default)]
    pub name: String,

    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        rename = "preco",
        default,
        with = "decimal_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,

    #[serde(rename = "quantidadeEstoque", default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i32>,
}

impl Representation for ProductRepresentation {
    const XML_ROOT: &'static str = "product";
}

/// Number of stored products, `<count>` in XML and a bare number elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCount(pub u64);

impl Representation for ProductCount {
    const XML_ROOT: &'static str = "count";
}

impl Validate for ProductRepresentation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_name(&self.name) {
            errors.add("nome", e);
        }
        if let Err(e) = validate_price(self.price.as_ref()) {
            errors.add("preco", e);
        }
        if let Err(e) = validate_stock(self.stock_quantity) {
            errors.add("quantidadeEstoque", e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(rule("required", "O nome do produto é obrigatório"));
    }
    Ok(())
}

const PRICE_SCALE: u32 = 2;

/// Largest accepted price. Up to 15 significant digits survive the trip
/// through a JSON/XML/YAML number unchanged, and it fits `NUMERIC(19,2)`.
fn max_price() -> Decimal {
    Decimal::new(999_999_999_999_999, PRICE_SCALE)
}

fn validate_price(price: Option<&Decimal>) -> Result<(), ValidationError> {
    match price {
        None => Err(rule("required", "O preço é obrigatório")),
        Some(p) if p.is_sign_negative() && !p.is_zero() => {
            Err(rule("range", "O preço não pode ser negativo"))
        }
        Some(p) if p.normalize().scale() > PRICE_SCALE => {
            Err(rule("scale", "O preço deve ter no máximo 2 casas decimais"))
        }
        Some(p) if *p > max_price() => {
            Err(rule("range", "O preço não pode ser maior que 9999999999999.99"))
        }
        Some(_) => Ok(()),
    }
}

fn validate_stock(stock: Option<i32>) -> Result<(), ValidationError> {
    match stock {
        None => Err(rule("required", "A quantidade em estoque é obrigatória")),
        Some(q) if q < 0 => Err(rule("range", "A quantidade em estoque não pode ser negativa")),
        Some(_) => Ok(()),
    }
}

/// Prices travel as plain numbers (`9.99`) in every format and are kept as
/// [`Decimal`] internally.
mod decimal_number {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::FromPrimitive;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer, ser};
    use std::fmt;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(price) => {
                // Parsing the text yields the nearest double, which prints back
                // as the same digits for any validated price
                let number = f64::from_str(&price.to_string()).map_err(ser::Error::custom)?;
                serializer.serialize_some(&number)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
        deserializer.deserialize_option(OptionalDecimal)
    }

    struct OptionalDecimal;

    impl<'de> Visitor<'de> for OptionalDecimal {
        type Value = Option<Decimal>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal number")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_f64(DecimalNumber).map(Some)
        }
    }

    struct DecimalNumber;

    impl Visitor<'_> for DecimalNumber {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal number")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            // Shortest round-trip text keeps 9.99 from becoming 9.9900000000000002131628
            Decimal::from_str(&v.to_string())
                .or_else(|_| Decimal::from_f64(v).ok_or(()))
                .map_err(|_| E::custom(format!("{} is not a representable price", v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            Decimal::from_str(v.trim()).map_err(|_| E::custom(format!("invalid decimal: {}", v)))
        }
    }
}
