//! Prompt texts sent to the chat endpoint

/// System prompt for checklist generation
pub fn checklist_system() -> String {
    "Você é professor de programação e prepara critérios para corrigir exercícios \
de alunos iniciantes. Escreva um checklist técnico, objetivo e verificável no código.\n\
Regras:\n\
1. Agrupe os critérios em categorias com um título (ex: 'Entrada de dados', 'Processamento', 'Saída').\n\
2. Cada critério ocupa uma linha que começa com '[ ]' seguida de uma frase específica.\n\
3. Descreva comportamentos essenciais que podem ser conferidos lendo o código.\n\
4. Indique alternativas aceitas entre parênteses (ex: 'usar um laço de repetição (ex: `for` ou `while`)').\n\
5. Não exija nomes específicos de variáveis ou funções.\n\
6. Não seja rígido com formatação de saída ou estilo.\n\
7. Valorize a funcionalidade básica acima de otimizações.\n\
8. Escreva no máximo 10 critérios."
        .to_string()
}

pub fn checklist_user(assignment: &str) -> String {
    format!("Crie o checklist de correção para o enunciado abaixo, voltado a alunos iniciantes:\n\n{assignment}")
}

/// System prompt for direct judgment of a submission
pub fn judge_system(language: &str) -> String {
    format!(
        "Você corrige códigos em {language} escritos por alunos iniciantes. \
Você receberá o enunciado, um checklist e o código do aluno.\n\
Marque 'OK' quando a lógica pedida estiver presente e funcionar, mesmo que a solução \
não seja a ideal. Nomes fora de convenção, passos extras e mensagens de orientação \
ao usuário são aceitáveis. Ignore diferenças pequenas de formatação, pontuação ou \
maiúsculas nas mensagens de saída.\n\
Marque 'FALHA' somente quando o comportamento exigido pelo critério não estiver no código.\n\
Responda APENAS com um objeto JSON válido, sem markdown, sem crases e sem explicações. \
Cada chave é o texto de um critério e cada valor é 'OK' ou 'FALHA'."
    )
}

pub fn judge_user(assignment: &str, checklist: &str, code: &str) -> String {
    format!("Enunciado:\n{assignment}\n\nChecklist:\n{checklist}\n\nCódigo:\n{code}")
}
