use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
    pub message: String,
    pub version: String,
    pub timestamp: String,
}

/// Form fields of the vehicle sale contract.
///
/// Documentation only: handlers read the body as a loose JSON object and
/// every field may be omitted. Amounts accept numbers or strings such as
/// "12.500,00"; dates use `YYYY-MM-DD`.
#[allow(dead_code)]
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSaleForm {
    pub numero_contrato: Option<String>,
    pub nome_vendedor: Option<String>,
    pub nif_vendedor: Option<String>,
    pub cartao_cidadao_vendedor: Option<String>,
    pub morada_vendedor: Option<String>,
    pub telefone_vendedor: Option<String>,
    pub email_vendedor: Option<String>,
    #[schema(example = "João Conceição")]
    pub nome_comprador: Option<String>,
    pub nif_comprador: Option<String>,
    /// Buyer's citizen card number.
    pub cartao_cidadao: Option<String>,
    pub morada_comprador: Option<String>,
    pub telefone_comprador: Option<String>,
    pub email_comprador: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub matricula: Option<String>,
    pub ano: Option<String>,
    pub cor: Option<String>,
    pub quilometragem: Option<String>,
    pub numero_chassi: Option<String>,
    pub combustivel: Option<String>,
    #[schema(example = "1461")]
    pub cilindrada: Option<String>,
    #[schema(example = "15000")]
    pub preco_venda: Option<String>,
    pub sinal_pago: Option<String>,
    pub valor_restante: Option<String>,
    #[schema(example = "12")]
    pub numero_prestacoes: Option<String>,
    pub valor_prestacao: Option<String>,
    #[schema(example = "2025-10-01")]
    pub data_inicio_pagamentos: Option<String>,
    pub data_entrega: Option<String>,
    pub local_entrega: Option<String>,
    pub iban_sepa: Option<String>,
    pub bic_sepa: Option<String>,
    pub morada_sepa: Option<String>,
    pub codigo_postal_sepa: Option<String>,
    pub cidade_sepa: Option<String>,
    pub pais_sepa: Option<String>,
    pub data_sepa: Option<String>,
    pub localidade_sepa: Option<String>,
    pub nome_sepa: Option<String>,
    pub observacoes: Option<String>,
    pub data_assinatura: Option<String>,
    pub local_assinatura: Option<String>,
}

/// Form fields of the debt confession. Documentation only, like
/// [`VehicleSaleForm`].
#[allow(dead_code)]
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebtConfessionForm {
    pub numero_confissao: Option<String>,
    pub numero_contrato: Option<String>,
    #[schema(example = "Rui Costa")]
    pub nome_devedor: Option<String>,
    pub nif_devedor: Option<String>,
    pub cartao_cidadao_devedor: Option<String>,
    pub morada_devedor: Option<String>,
    pub telefone_devedor: Option<String>,
    pub email_devedor: Option<String>,
    pub nome_credor: Option<String>,
    pub nif_credor: Option<String>,
    pub cartao_cidadao_credor: Option<String>,
    pub morada_credor: Option<String>,
    pub telefone_credor: Option<String>,
    pub email_credor: Option<String>,
    pub valor_total_divida: Option<String>,
    pub valor_total_extenso: Option<String>,
    pub valor_ja_pago: Option<String>,
    #[schema(example = "4500,00")]
    pub valor_em_divida: Option<String>,
    pub numero_prestacoes: Option<String>,
    pub valor_prestacao: Option<String>,
    pub data_inicio_pagamentos: Option<String>,
    pub entrada_inicial: Option<String>,
    pub saldo_remanescente: Option<String>,
    #[schema(example = "2025-10-15")]
    pub data_primeira_prestacao: Option<String>,
    pub iban_credor: Option<String>,
    pub observacoes: Option<String>,
    pub data_assinatura: Option<String>,
    pub local_assinatura: Option<String>,
}
