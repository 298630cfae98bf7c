//! Generator for the Contrato de Compra e Venda de Veículo.
//!
//! Seller and buyer identification, vehicle and financial data, payment
//! conditions, the fixed clause list and two signatures. When a SEPA IBAN is
//! supplied the contract also carries a bank-transfer sentence and a direct
//! debit mandate on its own page.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::blocks::Block;
use super::clock::Clock;
use super::common::{
    closing_blocks, format_date, format_euro, observation_blocks, party_blocks,
    short_date_or_placeholder, DateFormat, PLACEHOLDER, PLACEHOLDER_LONG,
};
use super::engine::{PageConfig, PdfRenderEngine};
use super::record::InputRecord;
use super::traits::Generator;
use super::{GeneratedDocument, GeneratorError};

const DOCUMENT_TITLE: &str = "CONTRATO DE COMPRA E VENDA DE VEÍCULO";
const FILE_STEM: &str = "contrato-automovel";
const DEFAULT_DELIVERY_PLACE: &str =
    "nas instalações da Vendedora ou em outro local acordado entre as Partes";

const CLAUSES: [&str; 7] = [
    "1. O vendedor declara ser o legítimo proprietário do veículo descrito neste contrato.",
    "2. O veículo é vendido no estado em que se encontra, tendo o comprador examinado o mesmo.",
    "3. O comprador compromete-se a efetuar o pagamento nas condições acordadas.",
    "4. A transferência de propriedade será efetuada após o pagamento integral do valor acordado.",
    "5. Qualquer alteração a este contrato deverá ser feita por escrito e assinada por ambas as partes.",
    "6. Este contrato é regido pela legislação portuguesa.",
    "7. O veículo é vendido com garantia de bom funcionamento pelo prazo de 18 (dezoito) meses, \
     contados da data da entrega, nos termos do Decreto-Lei n.º 84/2021. A garantia não abrange \
     danos decorrentes de uso incorreto, acidentes, desgaste natural ou falta de manutenção adequada.",
];

const PARTIES_INTRO: &str = "A Vendedora e o Comprador, adiante designados em conjunto \"Partes\" e, \
     individualmente, \"Parte\", celebram o presente Contrato de Compra e Venda de Automóvel \
     (doravante \"Contrato\"), que se rege pelas disposições legais aplicáveis – designadamente o \
     Código Civil, o Decreto-Lei n.º 84/2021 e demais legislação em vigor – bem como pelas \
     cláusulas seguintes.";

/// Headed clauses printed after the numbered list, each with two sub-items.
const HEADED_CLAUSES: [(&str, [&str; 2]); 4] = [
    (
        "CLÁUSULA 8.ª – DESPESAS",
        [
            "8.1. As despesas de registo e transmissão de propriedade do veículo ficam a cargo da \
             Vendedora.",
            "8.2. O Comprador é exclusivamente responsável por quaisquer infrações rodoviárias a \
             partir da data da entrega.",
        ],
    ),
    (
        "CLÁUSULA 9.ª – INCUMPRIMENTO",
        [
            "9.1. O não pagamento de qualquer das prestações implica o vencimento imediato de todas \
             as restantes prestações em dívida.",
            "9.2. Em caso de mora, serão devidos juros à taxa legal em vigor.",
        ],
    ),
    (
        "CLÁUSULA 10.ª – RESOLUÇÃO",
        [
            "10.1. Qualquer das Partes poderá resolver o presente Contrato em caso de incumprimento \
             grave da outra Parte.",
            "10.2. A resolução será comunicada por escrito, com aviso prévio de 15 (quinze) dias.",
        ],
    ),
    (
        "CLÁUSULA 11.ª – FORO E LEI APLICÁVEL",
        [
            "11.1. Para todas as questões emergentes do presente Contrato, é competente o Tribunal \
             da Comarca da Maia.",
            "11.2. O presente Contrato rege-se pela lei portuguesa.",
        ],
    ),
];

const SEPA_INTRO: [&str; 3] = [
    "Ao subscrever esta autorização, está a autorizar (A) o Credor a enviar instruções ao seu \
     banco para debitar a sua conta e (B) o seu banco a debitar a sua conta, de acordo com as \
     instruções do Credor.",
    "Os seus direitos incluem a possibilidade de exigir do seu Banco o reembolso do montante \
     debitado, nos termos e condições acordados com o seu banco. O reembolso deve ser solicitado \
     até um prazo de oito semanas, a contar da data do débito na sua conta.",
    "Os seus direitos, referentes à autorização, são explicados em declaração que pode obter \
     junto do seu Banco.",
];

/// Generator for vehicle sale contracts.
pub struct VehicleSaleGenerator {
    clock: Arc<dyn Clock>,
    engine: PdfRenderEngine,
}

impl VehicleSaleGenerator {
    pub fn new(clock: Arc<dyn Clock>, page: PageConfig) -> Self {
        Self {
            clock,
            engine: PdfRenderEngine::new(page),
        }
    }

    /// `numeroContrato`, else the buyer's NIF, else a number derived from `now`.
    fn contract_number(record: &InputRecord, now: NaiveDateTime) -> String {
        ["numeroContrato", "nifComprador"]
            .iter()
            .find(|key| record.is_filled(key))
            .map(|key| record.get_or(key, ""))
            .unwrap_or_else(|| format!("AUTO-{}", now.format("%Y%m%d%H%M%S")))
    }

    fn assemble_at(&self, record: &InputRecord, now: NaiveDateTime) -> Vec<Block> {
        let contract_number = Self::contract_number(record, now);

        let mut blocks = vec![
            Block::title(DOCUMENT_TITLE),
            Block::subtitle(format!("Contrato n.º {contract_number}")),
        ];

        blocks.extend(party_blocks(record, "VENDEDOR:", "Vendedor", "cartaoCidadaoVendedor"));
        blocks.extend(party_blocks(record, "COMPRADOR:", "Comprador", "cartaoCidadao"));
        blocks.push(Block::body(PARTIES_INTRO));

        blocks.push(Block::section("DADOS DO VEÍCULO:"));
        blocks.push(Block::labelled_lines(&[
            ("Marca", record.text_or("marca", PLACEHOLDER)),
            ("Modelo", record.text_or("modelo", PLACEHOLDER)),
            ("Matrícula", record.text_or("matricula", PLACEHOLDER)),
            ("Ano", record.text_or("ano", PLACEHOLDER)),
            ("Cor", record.text_or("cor", PLACEHOLDER)),
            (
                "Quilometragem",
                format!("{} km", record.text_or("quilometragem", PLACEHOLDER)),
            ),
            ("Número do Chassi", record.text_or("numeroChassi", PLACEHOLDER_LONG)),
            ("Combustível", record.text_or("combustivel", PLACEHOLDER)),
            ("Cilindrada", format!("{} cm³", record.text_or("cilindrada", PLACEHOLDER))),
        ]));

        blocks.push(Block::section("INFORMAÇÕES FINANCEIRAS:"));
        blocks.push(Block::labelled_lines(&[
            ("Preço de Venda", format_euro(record.field("precoVenda"))),
            ("Sinal Pago", format_euro(record.field("sinalPago"))),
            ("Valor Restante", format_euro(record.field("valorRestante"))),
            ("Número de Prestações", record.text_or("numeroPrestacoes", PLACEHOLDER)),
            ("Valor da Prestação", format_euro(record.field("valorPrestacao"))),
            (
                "Data de Início dos Pagamentos",
                short_date_or_placeholder(record, "dataInicioPagamentos"),
            ),
        ]));

        blocks.push(Block::section("CONDIÇÕES DE PAGAMENTO:"));
        blocks.push(Block::body(payment_sentence(record)));
        if record.is_filled("ibanSepa") {
            blocks.push(Block::body(format!(
                "Os pagamentos serão efetuados por transferência bancária para o IBAN da Vendedora: {}.",
                record.get_or("ibanSepa", "")
            )));
        }

        if record.is_filled("dataEntrega") {
            blocks.push(Block::section("ENTREGA:"));
            blocks.push(Block::body(format!(
                "O veículo será entregue ao Comprador em {}, {}.",
                format_date(record.field("dataEntrega"), DateFormat::LONG),
                record.text_or("localEntrega", DEFAULT_DELIVERY_PLACE)
            )));
            blocks.push(Block::body(
                "A partir do momento da entrega, o Comprador assume todos os riscos e \
                 responsabilidades inerentes ao uso do veículo.",
            ));
        }

        blocks.push(Block::section("CLÁUSULAS DO CONTRATO:"));
        blocks.extend(CLAUSES.iter().map(|clause| Block::body(*clause)));
        for (heading, items) in HEADED_CLAUSES {
            blocks.push(Block::clause(heading));
            blocks.extend(items.iter().map(|item| Block::indented(*item)));
        }

        blocks.extend(observation_blocks(record));
        blocks.extend(closing_blocks(record, now, "Vendedor", "Comprador"));

        if record.is_filled("ibanSepa") {
            blocks.extend(sepa_mandate(record, &contract_number));
        }

        blocks
    }
}

/// Installment branch: plural form when more than one installment is agreed.
fn payment_sentence(record: &InputRecord) -> String {
    let remaining = format_euro(record.field("valorRestante"));
    let start = short_date_or_placeholder(record, "dataInicioPagamentos");

    match record.installment_count() {
        Some(count) if count > 1 => format!(
            "O Comprador pagará o valor restante de {remaining} em {count} prestações de {} cada, \
             com início em {start}.",
            format_euro(record.field("valorPrestacao"))
        ),
        _ => format!("O Comprador pagará o valor restante de {remaining} até {start}."),
    }
}

fn sepa_mandate(record: &InputRecord, contract_number: &str) -> Vec<Block> {
    let mut blocks = vec![
        Block::PageBreak,
        Block::title("Autorização de Débito Directo SEPA"),
    ];
    blocks.extend(SEPA_INTRO.iter().map(|text| Block::body(*text)));

    blocks.push(Block::clause("Identificação da Autorização"));
    blocks.push(Block::labelled_lines(&[
        ("Relativamente ao contrato", contract_number.to_string()),
        ("Tipo de pagamento", "(X) recorrente".to_string()),
    ]));

    blocks.push(Block::clause("Identificação do Devedor"));
    blocks.push(Block::labelled_lines(&[
        ("Morada", record.text_or("moradaSepa", PLACEHOLDER_LONG)),
        ("Código Postal", record.text_or("codigoPostalSepa", PLACEHOLDER)),
        ("Cidade", record.text_or("cidadeSepa", PLACEHOLDER)),
        ("País", record.text_or("paisSepa", PLACEHOLDER)),
        ("Número de conta (IBAN)", record.text_or("ibanSepa", PLACEHOLDER_LONG)),
        ("BIC SWIFT", record.text_or("bicSepa", PLACEHOLDER)),
    ]));
    blocks.push(Block::indented(
        "(Pode consultar o seu IBAN e BIC do Banco através do seu extracto de conta)",
    ));
    blocks.push(Block::labelled_lines(&[
        ("Data", short_date_or_placeholder(record, "dataSepa")),
        ("Localidade", record.text_or("localidadeSepa", PLACEHOLDER)),
        ("Nome", record.text_or("nomeSepa", PLACEHOLDER_LONG)),
    ]));

    blocks.push(Block::clause("ASSINATURA DO CLIENTE:"));
    blocks.push(Block::body(format!(
        "Nome: {}",
        record.text_or("nomeComprador", PLACEHOLDER_LONG)
    )));
    blocks.push(Block::Spacer(30.0));
    blocks.push(Block::body("_".repeat(50)));
    blocks.push(Block::body(
        "(Assinatura do Cliente autorizando débito direto SEPA)",
    ));

    blocks
}

impl Generator for VehicleSaleGenerator {
    fn assemble(&self, record: &InputRecord) -> Vec<Block> {
        self.assemble_at(record, self.clock.now())
    }

    fn generate(&self, record: &InputRecord) -> Result<GeneratedDocument, GeneratorError> {
        let now = self.clock.now();
        let blocks = self.assemble_at(record, now);
        let buyer = record.text_or("nomeComprador", "");

        self.engine
            .render(DOCUMENT_TITLE, &blocks, FILE_STEM, Some(&buyer), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::clock::FixedClock;
    use crate::generators::common::PLACEHOLDER_DATE;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn generator() -> VehicleSaleGenerator {
        let now = NaiveDate::from_ymd_opt(2025, 9, 11)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();
        VehicleSaleGenerator::new(Arc::new(FixedClock(now)), PageConfig::default())
    }

    fn record(value: Value) -> InputRecord {
        serde_json::from_value(value).unwrap()
    }

    fn text_of(blocks: &[Block]) -> String {
        blocks
            .iter()
            .filter_map(Block::content)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_record_still_assembles() {
        let blocks = generator().assemble(&InputRecord::default());
        assert!(!blocks.is_empty());

        let text = text_of(&blocks);
        assert!(text.contains(DOCUMENT_TITLE));
        assert!(text.contains(&format!("Nome: {PLACEHOLDER_LONG}")));
        assert!(text.contains("Preço de Venda: 0,00 €"));
        assert!(text.contains(&format!("até {PLACEHOLDER_DATE}")));
        assert!(text.contains("Data: 11/09/2025"));
        assert!(!text.contains("OBSERVAÇÕES:"));
        assert!(!blocks.contains(&Block::PageBreak));
    }

    #[test]
    fn test_contract_number_fallbacks() {
        let gen = generator();

        let text = text_of(&gen.assemble(&record(json!({ "numeroContrato": "CV-7" }))));
        assert!(text.contains("Contrato n.º CV-7"));

        let text = text_of(&gen.assemble(&record(json!({ "nifComprador": "245678901" }))));
        assert!(text.contains("Contrato n.º 245678901"));

        let text = text_of(&gen.assemble(&InputRecord::default()));
        assert!(text.contains("Contrato n.º AUTO-20250911143005"));
    }

    #[test]
    fn test_installment_branch_plural() {
        let rec = record(json!({
            "valorRestante": "6000",
            "numeroPrestacoes": "12",
            "valorPrestacao": "500",
            "dataInicioPagamentos": "2025-10-01"
        }));
        let text = text_of(&generator().assemble(&rec));
        assert!(text.contains(
            "em 12 prestações de 500,00 € cada, com início em 01/10/2025."
        ));
    }

    #[test]
    fn test_installment_branch_single() {
        let rec = record(json!({ "numeroPrestacoes": 1, "dataInicioPagamentos": "2025-10-01" }));
        let text = text_of(&generator().assemble(&rec));
        assert!(text.contains("O Comprador pagará o valor restante de 0,00 € até 01/10/2025."));
        assert!(!text.contains("prestações de"));
    }

    #[test]
    fn test_observations_only_when_filled() {
        let gen = generator();
        let with = text_of(&gen.assemble(&record(json!({ "observacoes": "Pneus novos." }))));
        assert!(with.contains("OBSERVAÇÕES:\nPneus novos."));

        let blank = text_of(&gen.assemble(&record(json!({ "observacoes": "  " }))));
        assert!(!blank.contains("OBSERVAÇÕES:"));
    }

    #[test]
    fn test_delivery_clause_uses_long_date() {
        let rec = record(json!({ "dataEntrega": "2025-09-20", "localEntrega": "no stand da Maia" }));
        let text = text_of(&generator().assemble(&rec));
        assert!(text.contains("O veículo será entregue ao Comprador em 20 de setembro de 2025, no stand da Maia."));
    }

    #[test]
    fn test_sepa_page_follows_iban() {
        let gen = generator();
        let blocks = gen.assemble(&record(json!({ "ibanSepa": "PT50000201231234567890154" })));
        assert!(blocks.contains(&Block::PageBreak));

        let text = text_of(&blocks);
        assert!(text.contains("IBAN da Vendedora: PT50000201231234567890154."));
        assert!(text.contains("Autorização de Débito Directo SEPA"));
        assert!(text.contains(&format!("Código Postal: {PLACEHOLDER}")));
    }

    #[test]
    fn test_parties_intro_follows_buyer() {
        let blocks = generator().assemble(&InputRecord::default());
        let intro = blocks
            .iter()
            .position(|block| block == &Block::body(PARTIES_INTRO))
            .unwrap();
        let buyer = blocks
            .iter()
            .position(|block| block == &Block::section("COMPRADOR:"))
            .unwrap();
        assert_eq!(intro, buyer + 2);
        assert!(PARTIES_INTRO.contains("Decreto-Lei n.º 84/2021"));
    }

    #[test]
    fn test_buyer_citizen_card_and_displacement() {
        let rec = record(json!({
            "nifComprador": "245678901",
            "cartaoCidadao": "12345678 9ZZ0",
            "cilindrada": "1461"
        }));
        let text = text_of(&generator().assemble(&rec));
        assert!(text.contains("NIF: 245678901\nCartão de Cidadão n.º: 12345678 9ZZ0"));
        assert!(text.contains("Cilindrada: 1461 cm³"));

        let text = text_of(&generator().assemble(&InputRecord::default()));
        assert!(!text.contains("Cartão de Cidadão"));
        assert!(text.contains(&format!("Cilindrada: {PLACEHOLDER} cm³")));
    }

    #[test]
    fn test_headed_clauses_cover_costs_default_termination_and_venue() {
        let blocks = generator().assemble(&InputRecord::default());
        assert!(blocks.contains(&Block::clause("CLÁUSULA 8.ª – DESPESAS")));
        assert!(blocks.contains(&Block::clause("CLÁUSULA 11.ª – FORO E LEI APLICÁVEL")));

        let text = text_of(&blocks);
        assert!(text.contains("infrações rodoviárias a partir da data da entrega"));
        assert!(text.contains("vencimento imediato de todas as restantes prestações"));
        assert!(text.contains("com aviso prévio de 15 (quinze) dias."));
        assert!(text.contains("competente o Tribunal da Comarca da Maia."));

        let sub_items = blocks
            .iter()
            .filter(|block| block.style() == Some(crate::generators::blocks::BlockStyle::Indented))
            .count();
        assert_eq!(sub_items, 8);
    }

    #[test]
    fn test_signatures_close_the_contract() {
        let blocks = generator().assemble(&InputRecord::default());
        assert_eq!(
            blocks.last(),
            Some(&Block::signatures("Vendedor", "Comprador"))
        );
    }

    #[test]
    fn test_generate_names_file_after_buyer() {
        let doc = generator()
            .generate(&record(json!({ "nomeComprador": "João Conceição" })))
            .unwrap();
        assert!(doc.pdf.starts_with(b"%PDF-"));
        assert_eq!(
            doc.filename,
            "contrato-automovel-joao-conceicao-20250911_143005.pdf"
        );
    }
}
