//! Product record model and column normalization
//!
//! Every column is ingested as raw text, then normalized in a single pass:
//! placeholder strings become null for all columns, and the fixed set of
//! numeric columns is coerced afterwards. A failed numeric conversion yields
//! null, never zero and never an error.

use serde::{Deserialize, Serialize};

/// Placeholder strings that mean "no value" in the source data.
const NULL_MARKERS: [&str; 3] = ["nan", "NaN", "null"];

/// One row of the product analytics dataset.
///
/// Field names are the dataset's own column names; every field is optional
/// and a record with all nulls is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id_tie_fecha_valor: Option<String>,
    pub id_cli_cliente: Option<i64>,
    pub id_ga_vista: Option<i64>,
    pub id_ga_tipo_dispositivo: Option<i64>,
    pub id_ga_fuente_medio: Option<i64>,
    pub desc_ga_sku_producto: Option<String>,
    pub desc_ga_categoria_producto: Option<String>,
    pub fc_agregado_carrito_cant: Option<i64>,
    pub fc_ingreso_producto_monto: Option<f64>,
    pub fc_retirado_carrito_cant: Option<i64>,
    pub fc_detalle_producto_cant: Option<i64>,
    pub fc_producto_cant: Option<i64>,
    pub desc_ga_nombre_producto: Option<String>,
    pub fc_visualizaciones_pag_cant: Option<i64>,
    pub flag_pipol: Option<i64>,
    #[serde(rename = "SASASA")]
    pub sasasa: Option<String>,
    pub id_ga_producto: Option<i64>,
    pub desc_ga_nombre_producto_1: Option<String>,
    pub desc_ga_sku_producto_1: Option<String>,
    pub desc_ga_marca_producto: Option<String>,
    pub desc_ga_cod_producto: Option<String>,
    pub desc_categoria_producto: Option<String>,
    pub desc_categoria_prod_principal: Option<String>,
}

impl ProductRecord {
    /// Build a record from parallel header / raw-cell slices.
    ///
    /// Headers the record does not know are ignored; missing columns stay
    /// null. Rows shorter than the header are padded with nulls by the
    /// caller handing in fewer cells.
    pub fn from_row(headers: &[String], cells: &[String]) -> Self {
        let mut record = Self::default();

        for (i, header) in headers.iter().enumerate() {
            let raw = cells.get(i).map(String::as_str).unwrap_or("");
            match header.trim() {
                "id_tie_fecha_valor" => record.id_tie_fecha_valor = normalize_text(raw),
                "id_cli_cliente" => record.id_cli_cliente = coerce_int(raw),
                "id_ga_vista" => record.id_ga_vista = coerce_int(raw),
                "id_ga_tipo_dispositivo" => record.id_ga_tipo_dispositivo = coerce_int(raw),
                "id_ga_fuente_medio" => record.id_ga_fuente_medio = coerce_int(raw),
                "desc_ga_sku_producto" => record.desc_ga_sku_producto = normalize_text(raw),
                "desc_ga_categoria_producto" => {
                    record.desc_ga_categoria_producto = normalize_text(raw)
                }
                "fc_agregado_carrito_cant" => record.fc_agregado_carrito_cant = coerce_int(raw),
                "fc_ingreso_producto_monto" => {
                    record.fc_ingreso_producto_monto = coerce_float(raw)
                }
                "fc_retirado_carrito_cant" => record.fc_retirado_carrito_cant = coerce_int(raw),
                "fc_detalle_producto_cant" => record.fc_detalle_producto_cant = coerce_int(raw),
                "fc_producto_cant" => record.fc_producto_cant = coerce_int(raw),
                "desc_ga_nombre_producto" => record.desc_ga_nombre_producto = normalize_text(raw),
                "fc_visualizaciones_pag_cant" => {
                    record.fc_visualizaciones_pag_cant = coerce_int(raw)
                }
                "flag_pipol" => record.flag_pipol = coerce_int(raw),
                "SASASA" => record.sasasa = normalize_text(raw),
                "id_ga_producto" => record.id_ga_producto = coerce_int(raw),
                "desc_ga_nombre_producto_1" => {
                    record.desc_ga_nombre_producto_1 = normalize_text(raw)
                }
                "desc_ga_sku_producto_1" => record.desc_ga_sku_producto_1 = normalize_text(raw),
                "desc_ga_marca_producto" => record.desc_ga_marca_producto = normalize_text(raw),
                "desc_ga_cod_producto" => record.desc_ga_cod_producto = normalize_text(raw),
                "desc_categoria_producto" => record.desc_categoria_producto = normalize_text(raw),
                "desc_categoria_prod_principal" => {
                    record.desc_categoria_prod_principal = normalize_text(raw)
                }
                _ => {}
            }
        }

        record
    }
}

/// Placeholder-to-null normalization for text columns.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NULL_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Coerce a raw cell to an integer; anything non-numeric is null.
///
/// Source exports sometimes write whole numbers as "8.0", so a float parse
/// is accepted when it has no fractional part.
pub fn coerce_int(raw: &str) -> Option<i64> {
    let text = normalize_text(raw)?;
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    match text.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}

/// Coerce a raw cell to a float; anything non-numeric is null.
pub fn coerce_float(raw: &str) -> Option<f64> {
    let text = normalize_text(raw)?;
    text.parse::<f64>().ok().filter(|f| f.is_finite())
}
