//! End-to-end engine tests: submissions directory to verdict report

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use gradecheck_core::config::{EngineConfig, MatchMode};
use gradecheck_core::corpus::{source_map, SubmissionLoader};
use gradecheck_core::evaluate::{Evaluator, SubmissionStatus};
use gradecheck_core::matcher::Verdict;
use tempfile::tempdir;

const CHECKLIST: &str = "\
## Entrada de dados
[ ] Validar entrada do usuário com número inteiro
[ ] Exibir o menu de opções para o usuário

## Processamento
[ ] Adicionar cliente na fila (ex: `Enqueue`)
[ ] Remover cliente da fila quando atendido
Lembre-se de comentar o código
";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn class_fixture(root: &Path) {
    write(
        root,
        "ana/Program.cs",
        r#"
using System;
using System.Collections.Generic;

class Program {
    static Queue<string> fila = new Queue<string>();

    static void Main() {
        Console.WriteLine("MENU DE OPÇÕES");
        Console.WriteLine("1 - Adicionar cliente");
        Console.WriteLine("2 - Remover cliente");
        int numero;
        // valida a entrada: precisa ser inteiro
        while (!int.TryParse(Console.ReadLine(), out numero)) { }
        if (numero == 1) fila.Enqueue(Console.ReadLine());
        if (numero == 2) fila.Dequeue();
    }
}
"#,
    );
    write(
        root,
        "bruno/src/Main.cs",
        "class Program { static void Main() { Console.WriteLine(\"Olá\"); } }",
    );
    write(root, "carla/README.md", "Esqueci de enviar o código");
    write(root, "notas.txt", "arquivo solto na raiz");
}

#[test]
fn test_class_run_produces_total_report() {
    let dir = tempdir().unwrap();
    class_fixture(dir.path());
    let config = EngineConfig::default();

    let submissions = SubmissionLoader::new(&config.corpus)
        .load_all(dir.path())
        .unwrap();
    let report = Evaluator::new(&config).evaluate(CHECKLIST, &source_map(&submissions));

    assert_eq!(report.criteria.len(), 4);
    assert_eq!(
        report.students.keys().collect::<Vec<_>>(),
        vec!["ana", "bruno", "carla"]
    );
    for result in report.students.values() {
        assert_eq!(result.total(), 4);
        assert!(result.criteria.keys().all(|c| !c.contains("Entrada de dados")));
        assert!(result.criteria.keys().all(|c| !c.contains("comentar")));
    }

    let ana = &report.students["ana"];
    assert_eq!(ana.status, SubmissionStatus::Evaluated);
    assert_eq!(ana.passed(), 4);

    let carla = &report.students["carla"];
    assert_eq!(carla.status, SubmissionStatus::NoSource);
    assert_eq!(carla.passed(), 0);
}

#[test]
fn test_weak_submission_lists_missing_keywords() {
    let dir = tempdir().unwrap();
    class_fixture(dir.path());
    let config = EngineConfig::default();

    let submissions = SubmissionLoader::new(&config.corpus)
        .load_all(dir.path())
        .unwrap();
    let report = Evaluator::new(&config).evaluate(CHECKLIST, &source_map(&submissions));

    let bruno = &report.students["bruno"];
    assert_eq!(bruno.status, SubmissionStatus::Evaluated);
    let validar = "Validar entrada do usuário com número inteiro";
    assert_eq!(bruno.criteria[validar], Verdict::Falha);
    assert_eq!(
        bruno.missing[validar],
        vec!["validar", "entrada", "numero", "inteiro"]
    );
}

#[test]
fn test_stricter_threshold_flips_verdicts() {
    let sources: BTreeMap<String, String> = [(
        "ana".to_string(),
        "int numero = int.parse(console.readline());".to_string(),
    )]
    .into_iter()
    .collect();
    let checklist = "[ ] Validar entrada do usuário com número inteiro";

    let lenient = Evaluator::new(&EngineConfig::default()).evaluate(checklist, &sources);
    assert_eq!(lenient.students["ana"].passed(), 0);

    let mut config = EngineConfig::default();
    config.matching.threshold = 0.25;
    let loose = Evaluator::new(&config).evaluate(checklist, &sources);
    assert_eq!(loose.students["ana"].passed(), 1);

    config.matching.threshold = 1.0;
    config.matching.mode = MatchMode::Word;
    let strict = Evaluator::new(&config).evaluate(checklist, &sources);
    assert_eq!(strict.students["ana"].passed(), 0);
}

#[test]
fn test_report_is_deterministic() {
    let dir = tempdir().unwrap();
    class_fixture(dir.path());
    let config = EngineConfig::default();
    let loader = SubmissionLoader::new(&config.corpus);
    let evaluator = Evaluator::new(&config);

    let first = evaluator.evaluate(CHECKLIST, &source_map(&loader.load_all(dir.path()).unwrap()));
    let second = evaluator.evaluate(CHECKLIST, &source_map(&loader.load_all(dir.path()).unwrap()));
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_no_source_matches_has_source() {
    let dir = tempdir().unwrap();
    write(dir.path(), "davi/Program.cs", "");
    write(dir.path(), "elisa/Program.cs", "// ção\n");
    write(dir.path(), "fabio/README.md", "sem código");
    let config = EngineConfig::default();

    let submissions = SubmissionLoader::new(&config.corpus)
        .load_all(dir.path())
        .unwrap();
    let report = Evaluator::new(&config).evaluate(CHECKLIST, &source_map(&submissions));

    for submission in &submissions {
        let status = report.students[&submission.student].status;
        let expected = if submission.has_source() {
            SubmissionStatus::Evaluated
        } else {
            SubmissionStatus::NoSource
        };
        assert_eq!(status, expected, "{}", submission.student);
    }
    assert_eq!(report.students["davi"].status, SubmissionStatus::Evaluated);
    assert_eq!(report.students["fabio"].status, SubmissionStatus::NoSource);
    assert!(report.students["davi"]
        .criteria
        .values()
        .all(|v| *v == Verdict::Falha));
}
