//! Generator for the Confissão de Dívida.
//!
//! A debtor acknowledges an amount owed to a creditor and commits to a
//! payment plan. The legal framework clauses make the document an
//! extrajudicial enforcement title and a European Enforcement Order.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::blocks::Block;
use super::clock::Clock;
use super::common::{
    closing_blocks, format_euro, observation_blocks, party_blocks, short_date_or_placeholder,
    PLACEHOLDER, PLACEHOLDER_LONG,
};
use super::engine::{PageConfig, PdfRenderEngine};
use super::record::InputRecord;
use super::traits::Generator;
use super::{GeneratedDocument, GeneratorError};

const DOCUMENT_TITLE: &str = "CONFISSÃO DE DÍVIDA";
const FILE_STEM: &str = "termo-confissao-divida";

/// Generator for debt confession instruments.
pub struct DebtConfessionGenerator {
    clock: Arc<dyn Clock>,
    engine: PdfRenderEngine,
}

impl DebtConfessionGenerator {
    pub fn new(clock: Arc<dyn Clock>, page: PageConfig) -> Self {
        Self {
            clock,
            engine: PdfRenderEngine::new(page),
        }
    }

    fn assemble_at(&self, record: &InputRecord, now: NaiveDateTime) -> Vec<Block> {
        let debtor = record.text_or("nomeDevedor", PLACEHOLDER_LONG);
        let instrument_number = ["numeroConfissao", "nifDevedor"]
            .iter()
            .find(|key| record.is_filled(key))
            .map(|key| record.get_or(key, ""))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let mut blocks = vec![
            Block::title(DOCUMENT_TITLE),
            Block::subtitle("Reconhecimento de Obrigação e Título Executivo Europeu"),
            Block::subtitle(format!("N.º {instrument_number}")),
        ];

        blocks.extend(party_blocks(record, "DEVEDOR:", "Devedor", "cartaoCidadaoDevedor"));
        blocks.extend(party_blocks(record, "CREDOR:", "Credor", "cartaoCidadaoCredor"));

        blocks.push(Block::section("INFORMAÇÕES DA DÍVIDA:"));
        let mut debt_lines = vec![
            ("Valor Total da Dívida", format_euro(record.field("valorTotalDivida"))),
            ("Valor Já Pago", format_euro(record.field("valorJaPago"))),
            ("Valor em Dívida", format_euro(record.field("valorEmDivida"))),
            ("Número de Prestações", record.text_or("numeroPrestacoes", PLACEHOLDER)),
            ("Valor da Prestação", format_euro(record.field("valorPrestacao"))),
            (
                "Data de Início dos Pagamentos",
                short_date_or_placeholder(record, "dataInicioPagamentos"),
            ),
        ];
        if record.is_filled("valorTotalExtenso") {
            debt_lines.push(("Valor por extenso", record.get_or("valorTotalExtenso", "")));
        }
        if record.is_filled("numeroContrato") {
            debt_lines.push(("Contrato de origem", record.get_or("numeroContrato", "")));
        }
        blocks.push(Block::labelled_lines(&debt_lines));

        blocks.push(Block::section("CONFISSÃO:"));
        blocks.push(Block::body(format!(
            "Eu, {debtor}, portador do NIF {}, confesso dever a {}, portador do NIF {}, \
             a quantia de {}.",
            record.text_or("nifDevedor", PLACEHOLDER),
            record.text_or("nomeCredor", PLACEHOLDER_LONG),
            record.text_or("nifCredor", PLACEHOLDER),
            format_euro(record.field("valorEmDivida")),
        )));

        blocks.push(Block::section("CONDIÇÕES DE PAGAMENTO:"));
        blocks.push(Block::body(payment_commitment(record)));
        blocks.extend(settlement_plan(record));
        if record.is_filled("ibanCredor") {
            blocks.push(Block::body(format!(
                "Os pagamentos serão efetuados por transferência bancária para o IBAN do Credor: \
                 {}, indicando como referência \"Confissão de Dívida - {debtor}\".",
                record.get_or("ibanCredor", "")
            )));
        }
        blocks.push(Block::body(
            "O Devedor poderá antecipar, parcial ou totalmente, qualquer prestação, sem \
             penalidade, devendo informar o Credor com 3 dias úteis de antecedência.",
        ));

        blocks.extend(legal_framework());
        blocks.extend(observation_blocks(record));
        blocks.extend(closing_blocks(record, now, "Devedor", "Credor"));

        blocks
    }
}

/// Installment branch: plural form when more than one installment is agreed.
fn payment_commitment(record: &InputRecord) -> String {
    let start = short_date_or_placeholder(record, "dataInicioPagamentos");

    match record.installment_count() {
        Some(count) if count > 1 => format!(
            "Comprometo-me a liquidar esta dívida em {count} prestações de {} cada, com início \
             em {start}.",
            format_euro(record.field("valorPrestacao"))
        ),
        _ => format!("Comprometo-me a liquidar esta dívida até {start}."),
    }
}

/// Down payment plus remaining balance, only when either amount is filled.
fn settlement_plan(record: &InputRecord) -> Vec<Block> {
    if !record.is_filled("entradaInicial") && !record.is_filled("saldoRemanescente") {
        return Vec::new();
    }

    vec![
        Block::body("As Partes acordam que a dívida será liquidada da seguinte forma:"),
        Block::indented(format!(
            "a) Entrada inicial de {}, paga na data de assinatura deste Termo;",
            format_euro(record.field("entradaInicial"))
        )),
        Block::indented(format!(
            "b) Saldo remanescente de {}, em {} prestações mensais de {} cada, vencendo-se a \
             primeira em {} e as restantes no mesmo dia dos meses subsequentes.",
            format_euro(record.field("saldoRemanescente")),
            record.text_or("numeroPrestacoes", PLACEHOLDER),
            format_euro(record.field("valorPrestacao")),
            short_date_or_placeholder(record, "dataPrimeiraPrestacao"),
        )),
    ]
}

fn legal_framework() -> Vec<Block> {
    vec![
        Block::section("ENQUADRAMENTO LEGAL:"),
        Block::clause("Confissão expressa"),
        Block::body(
            "Nos termos do artigo 394.º, n.º 2 do Código Civil português, o Devedor confessa e \
             reconhece integralmente a dívida referida na cláusula anterior, renunciando a \
             qualquer alegação de compensação, condição, exceção ou dedução que a possa afetar.",
        ),
        Block::clause("Título executivo"),
        Block::body(
            "A presente confissão constitui título executivo extrajudicial, para efeitos do \
             artigo 703.º, n.º 1, alínea b) do Código de Processo Civil (CPC), permitindo ao \
             Credor instaurar diretamente processo executivo em caso de incumprimento.",
        ),
        Block::clause("Título Executivo Europeu"),
        Block::body(
            "Para efeitos do Regulamento (CE) n.º 805/2004 (Título Executivo Europeu – TEE), as \
             Partes reconhecem que o presente documento contém uma obrigação não impugnada. O \
             Devedor declara que:",
        ),
        Block::indented(
            "a) Foi informado do direito de se opor à dívida e de instaurar processo \
             declarativo, mas opta por não o fazer;",
        ),
        Block::indented(
            "b) Concorda que o presente termo possa ser certificado como TEE, permitindo a \
             execução direta em qualquer Estado-Membro da União Europeia sem necessidade de \
             exequátur.",
        ),
        Block::clause("Mora e vencimento antecipado"),
        Block::body(
            "O não pagamento pontual de qualquer parcela implica, a partir do respetivo \
             vencimento:",
        ),
        Block::indented(
            "a) Vencimento imediato de todas as quantias remanescentes (artigo 780.º do Código \
             Civil);",
        ),
        Block::indented(
            "b) Aplicação de juros moratórios à taxa legal civil (Portaria 291/2003), acrescida \
             de 7 p.p., nos termos do DL 62/2013;",
        ),
        Block::indented(
            "c) Obrigação do Devedor de suportar todas as despesas e custas inerentes à \
             cobrança, judiciais e extrajudiciais, incluindo honorários de advogado.",
        ),
    ]
}

impl Generator for DebtConfessionGenerator {
    fn assemble(&self, record: &InputRecord) -> Vec<Block> {
        self.assemble_at(record, self.clock.now())
    }

    fn generate(&self, record: &InputRecord) -> Result<GeneratedDocument, GeneratorError> {
        let now = self.clock.now();
        let blocks = self.assemble_at(record, now);
        let debtor = record.text_or("nomeDevedor", "");

        self.engine
            .render(DOCUMENT_TITLE, &blocks, FILE_STEM, Some(&debtor), now)
    }
}
