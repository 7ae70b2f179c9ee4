use std::fmt::Write as _;

use crate::domain::menu_analysis::{
    entities::UserProfile,
    value_objects::{SchemaVersion, SuggestionBound},
};

/// Reference tables the model may take nutrient values from. Nothing else.
pub const NUTRITION_SOURCES: [&str; 3] = [
    "TACO (Tabela Brasileira de Composição de Alimentos - NEPA/UNICAMP)",
    "TBCA (Tabela Brasileira de Composição de Alimentos - USP)",
    "USDA FoodData Central",
];

const ROLE: &str = "Você é um assistente gastronômico especialista em recomendar pratos de \
restaurantes de acordo com o perfil de cada cliente. Você receberá uma ou mais fotos do \
cardápio de um restaurante.";

const QUALITY_CHECK_STEP: &str = "ETAPA 1 - VERIFICAÇÃO DE QUALIDADE:
Primeiro, tente extrair o texto (OCR) das imagens do cardápio. Faça o esforço de ler mesmo em \
condições imperfeitas, como leve desfoque, iluminação irregular ou ângulo inclinado. Marque \
\"isLegible\" como false somente se a extração realmente falhar. Nesse caso, preencha \
\"feedback\" com uma explicação específica e construtiva do problema (por exemplo: \"a foto está \
escura demais\", \"há reflexo sobre a lista de pratos\") e retorne \"suggestions\" vazio. Se o \
cardápio estiver legível, marque \"isLegible\" como true e use \"feedback\" para um breve \
comentário sobre a leitura.";

fn nutrition_step(step: usize) -> String {
    let mut text = format!("ETAPA {step} - ESTIMATIVA NUTRICIONAL:\n");
    text.push_str(
        "Para cada prato recomendado, identifique os ingredientes principais. Consulte os \
valores nutricionais SOMENTE nas seguintes fontes:\n",
    );
    for source in NUTRITION_SOURCES {
        let _ = writeln!(text, "- {source}");
    }
    text.push_str(
        "Se um ingrediente não for encontrado nessas fontes, ignore-o silenciosamente; nunca \
use outra fonte como substituta. Some as contribuições dos ingredientes e normalize o \
resultado para uma porção de 100g. Preencha \"calories\", \"carbohydrates\", \"fats\", \
\"protein\" e \"sodium\" em \"nutritionalInfo\", incluindo a unidade (por exemplo \"450 kcal\", \
\"12 g\", \"300 mg\"). Se não for possível determinar um valor, use \"N/A\"; nunca omita o campo.",
    );
    text
}

/// Builds the instruction text sent alongside the menu images.
pub fn build_menu_prompt(
    profile: &UserProfile,
    version: SchemaVersion,
    bound: SuggestionBound,
) -> String {
    let mut prompt = String::with_capacity(2048);
    prompt.push_str(ROLE);
    prompt.push_str("\n\nPERFIL DO CLIENTE:\n");
    for (label, value) in profile.prompt_lines() {
        let _ = writeln!(prompt, "- {label}: {value}");
    }
    prompt.push('\n');

    let mut step = 1;
    if version.requires_quality_check() {
        prompt.push_str(QUALITY_CHECK_STEP);
        prompt.push_str("\n\n");
        step += 1;
    }

    let _ = writeln!(prompt, "ETAPA {step} - RECOMENDAÇÕES:");
    if version.requires_quality_check() {
        prompt.push_str("Somente se o cardápio estiver legível, ");
    } else {
        prompt.push_str("Leia o cardápio das imagens e ");
    }
    let _ = write!(
        prompt,
        "cruze os pratos extraídos com o perfil do cliente e recomende {} pratos, \
ordenados do mais para o menos indicado. Para cada prato informe \"dishName\", \
\"description\" (como aparece no cardápio), \"price\" (exatamente como impresso) e \
\"reasonForRecommendation\" explicando a relação com o perfil. Respeite rigorosamente \
alergias e restrições alimentares.",
        bound.describe()
    );
    if version == SchemaVersion::Rich {
        prompt.push_str(
            " Informe também \"category\" com a categoria do prato (por exemplo: entrada, prato \
principal, sobremesa, bebida).",
        );
    }
    prompt.push_str("\n\n");

    if version.includes_nutrition() {
        step += 1;
        prompt.push_str(&nutrition_step(step));
        prompt.push_str("\n\n");
    }

    prompt.push_str("Responda apenas com JSON seguindo o esquema fornecido, em português.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu_analysis::entities::{
        DEFAULT_BUDGET, DEFAULT_MOOD, DEFAULT_UNSPECIFIED, ProfileField,
    };

    #[test]
    fn test_empty_profile_prompt_substitutes_defaults() {
        let prompt = build_menu_prompt(
            &UserProfile::default(),
            SchemaVersion::Rich,
            SuggestionBound::from(None),
        );

        assert!(prompt.contains(&format!("- Preferências de sabor: {DEFAULT_UNSPECIFIED}")));
        assert!(prompt.contains(&format!("- Alergias: {DEFAULT_UNSPECIFIED}")));
        assert!(prompt.contains(&format!("- Preferências alimentares: {DEFAULT_UNSPECIFIED}")));
        assert!(prompt.contains(&format!("- Humor atual: {DEFAULT_MOOD}")));
        assert!(prompt.contains(&format!("- Restrições alimentares: {DEFAULT_UNSPECIFIED}")));
        assert!(prompt.contains(&format!("- Orçamento: {DEFAULT_BUDGET}")));
        assert!(prompt.contains("de 3 a 5"));
    }

    #[test]
    fn test_rich_prompt_includes_gate_and_sources() {
        let prompt = build_menu_prompt(
            &UserProfile::default(),
            SchemaVersion::Rich,
            SuggestionBound::AtMost(4),
        );

        assert!(prompt.contains("VERIFICAÇÃO DE QUALIDADE"));
        assert!(prompt.contains("no máximo 4"));
        assert!(prompt.contains("nunca mais do que 4"));
        assert!(prompt.contains("\"N/A\""));
        for source in NUTRITION_SOURCES {
            assert!(prompt.contains(source));
        }
    }

    #[test]
    fn test_basic_prompt_skips_gate_and_nutrition() {
        let profile = UserProfile {
            allergies: Some(ProfileField::Tags(vec!["glúten".to_string()])),
            ..Default::default()
        };
        let prompt = build_menu_prompt(&profile, SchemaVersion::Basic, SuggestionBound::AtMost(2));

        assert!(prompt.contains("- Alergias: glúten"));
        assert!(!prompt.contains("VERIFICAÇÃO DE QUALIDADE"));
        assert!(!prompt.contains("ESTIMATIVA NUTRICIONAL"));
        assert!(prompt.contains("ETAPA 1 - RECOMENDAÇÕES"));
    }
}
