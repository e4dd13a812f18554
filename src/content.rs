//! Embedded source text and fixed brand copy.

/// Default quiz material: an excerpt of the Tarkia eBook.
pub const TARKIA_EBOOK_TEXT: &str = "\
O novo mapa da liberdade FINANCEIRA. Como Estruturar Negócios e Patrimônio em Dubai com Segurança Fiscal e Jurídica.
O Brasil Encarece, o Mundo Acelera. O custo de manter capital no Brasil não é mais apenas financeiro; é estrutural.
Erro 1 - Escolha da zona franca pela \"estrela\" e não pelo escopo estratégico.
Erro 2 - Ignorar os custos \"invisíveis\" que reduzem o rendimento real do negócio.
Erro 3 - Confiar em \"Promessas de visto\" ou em agentes sem due-diligence.
Erro 4 - Não separar o investimento imobiliário do planejamento societário/fiscal.
Erro 5 - Acreditar que \"0%\" de imposto significa \"sem obrigações\".
A lógica para o investidor estratégico: Transferir parte do portfólio imobiliário para uma holding ou empresa de investimento nos Emirados; Reter rendimentos em ambiente de baixa tributação e reinvesti-los em novos ativos; Blindar patrimônio de riscos políticos e sucessórios brasileiros; Aproveitar o câmbio, recebendo renda em AED/USD.
Imposto corporativo federal foi introduzido em junho de 2023 com taxa de 9% sobre lucros acima de AED 375.000.
Holding de participação: ideal muitas vezes para deter participações em empresas brasileiras ou internacionais.
Critérios para ser considerado residente fiscal nos EAU: Estar fisicamente presente nos EAU por 183 dias ou mais; ou 90 dias com residência permanente/visto.
A Tarkia ajuda você a estruturar além dos tijolos: diagnóstico patrimonial, saída fiscal do Brasil, constituição da holding nos EAU.
";

pub const THEME_COLOR: &str = "tarkia";

pub const BRAND_NAME: &str = "TARKIA";
pub const BRAND_TAGLINE: &str = "INTELLIGENCE";
pub const SCORE_CAPTION: &str = "ACERTOS";

pub const CTA_HEADLINE: &str = "QUER SABER O SEU NÍVEL?";
pub const CTA_PROMPT: &str = "Faça o teste no link da bio:";
pub const CTA_HANDLE: &str = "@tarkia.ae";

pub const SHARE_TITLE: &str = "Meu Resultado Tarkia";
pub const RESULT_FILE_NAME: &str = "tarkia-result.png";

pub const DOWNLOAD_NOTICE: &str =
    "A imagem foi salva no seu dispositivo. Poste no Instagram e marque @tarkia.ae!";
pub const SHARE_FAILED_NOTICE: &str = "Não foi possível compartilhar automaticamente.";
pub const GENERATION_FAILED_NOTICE: &str =
    "Erro ao gerar o quiz. Por favor verifique sua chave de API e tente novamente.";

pub fn share_caption(score: usize, total: usize) -> String {
    format!(
        "Acertei {}/{} no quiz da Tarkia! Você está preparado para investir em Dubai? Faça o teste também: @tarkia.ae #Tarkia #Dubai #Investimento",
        score, total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_caption_interpolates_score() {
        let caption = share_caption(3, 5);
        assert!(caption.starts_with("Acertei 3/5 no quiz da Tarkia!"));
        assert!(caption.contains("@tarkia.ae"));
    }

    #[test]
    fn test_ebook_excerpt_is_embedded() {
        assert!(TARKIA_EBOOK_TEXT.starts_with("O novo mapa"));
        assert!(TARKIA_EBOOK_TEXT.contains("183 dias"));
    }
}
