mod common;

use chrono::Timelike;
use common::*;
use gestao_escolar::{
    error::AppError,
    models::aula::{AulaPayload, FrequenciaEntrada, StatusFrequencia},
    services::aula_service,
};

fn entrada(aluno_id: i64, status: StatusFrequencia, nota: Option<f64>) -> FrequenciaEntrada {
    FrequenciaEntrada { aluno_id, status, nota }
}

fn aula(turma_id: i64, data: Option<&str>, frequencia: Vec<FrequenciaEntrada>) -> AulaPayload {
    AulaPayload {
        turma_id,
        titulo: None,
        conteudo: "Revisão".into(),
        objetivos: Some("Fixar conteúdo".into()),
        data: data.map(str::to_string),
        frequencia,
    }
}

struct Cenario {
    pool: sqlx::SqlitePool,
    turma: i64,
    alunos: Vec<i64>,
}

async fn cenario() -> Cenario {
    let pool = setup_pool().await;
    let unidade = nova_unidade(&pool, "Escola Norte").await;
    let turma = nova_turma(&pool, "9ºA", unidade).await;
    let mut alunos = Vec::new();
    for nome in ["Ana", "Bruno", "Caio", "Davi"] {
        alunos.push(novo_aluno(&pool, nome, turma).await);
    }
    Cenario { pool, turma, alunos }
}

#[tokio::test]
async fn criar_aula_grava_frequencia_com_nota_padrao_zero() {
    let c = cenario().await;
    let id = aula_service::create_lesson(
        &c.pool,
        &aula(
            c.turma,
            None,
            vec![
                entrada(c.alunos[0], StatusFrequencia::Presente, Some(9.5)),
                entrada(c.alunos[1], StatusFrequencia::Ausente, None),
            ],
        ),
    )
    .await
    .unwrap();

    let detalhe = aula_service::find_lesson(&c.pool, id).await.unwrap();
    assert_eq!(detalhe.frequencia.len(), 2);
    let bruno = detalhe.frequencia.iter().find(|f| f.aluno_id == c.alunos[1]).unwrap();
    assert_eq!(bruno.status, StatusFrequencia::Ausente);
    assert_eq!(bruno.nota, 0.0);
    assert_eq!(bruno.aluno_nome, "Bruno");
}

#[tokio::test]
async fn editar_substitui_frequencia_inteira() {
    let c = cenario().await;
    let id = aula_service::create_lesson(
        &c.pool,
        &aula(
            c.turma,
            None,
            vec![
                entrada(c.alunos[0], StatusFrequencia::Presente, Some(7.0)),
                entrada(c.alunos[1], StatusFrequencia::Presente, Some(6.0)),
            ],
        ),
    )
    .await
    .unwrap();

    aula_service::update_lesson(
        &c.pool,
        id,
        &aula(
            c.turma,
            None,
            vec![
                entrada(c.alunos[2], StatusFrequencia::Ausente, None),
                entrada(c.alunos[3], StatusFrequencia::Presente, Some(10.0)),
            ],
        ),
    )
    .await
    .unwrap();

    let detalhe = aula_service::find_lesson(&c.pool, id).await.unwrap();
    let mut presentes: Vec<_> = detalhe.frequencia.iter().map(|f| f.aluno_id).collect();
    presentes.sort();
    assert_eq!(presentes, vec![c.alunos[2], c.alunos[3]]);
}

#[tokio::test]
async fn editar_com_lista_vazia_apaga_toda_a_frequencia() {
    let c = cenario().await;
    let id = aula_service::create_lesson(
        &c.pool,
        &aula(c.turma, None, vec![entrada(c.alunos[0], StatusFrequencia::Presente, Some(5.0))]),
    )
    .await
    .unwrap();

    aula_service::update_lesson(&c.pool, id, &aula(c.turma, None, vec![])).await.unwrap();

    assert_eq!(contar(&c.pool, "SELECT COUNT(*) FROM frequencia WHERE aula_id = ?1", id).await, 0);
}

#[tokio::test]
async fn aluno_de_outra_turma_desfaz_a_criacao() {
    let c = cenario().await;
    let outra = nova_turma(&c.pool, "8ºB", 1).await;
    let intruso = novo_aluno(&c.pool, "Eva", outra).await;

    let r = aula_service::create_lesson(
        &c.pool,
        &aula(
            c.turma,
            None,
            vec![
                entrada(c.alunos[0], StatusFrequencia::Presente, None),
                entrada(intruso, StatusFrequencia::Presente, None),
            ],
        ),
    )
    .await;
    assert!(matches!(r, Err(AppError::ValidationError(_))));

    assert_eq!(contar(&c.pool, "SELECT COUNT(*) FROM aulas WHERE turma_id = ?1", c.turma).await, 0);
    assert_eq!(contar(&c.pool, "SELECT COUNT(*) FROM frequencia WHERE aluno_id = ?1", c.alunos[0]).await, 0);
}

#[tokio::test]
async fn edicao_invalida_mantem_frequencia_anterior() {
    let c = cenario().await;
    let id = aula_service::create_lesson(
        &c.pool,
        &aula(c.turma, None, vec![entrada(c.alunos[0], StatusFrequencia::Presente, Some(5.0))]),
    )
    .await
    .unwrap();

    let r = aula_service::update_lesson(
        &c.pool,
        id,
        &aula(c.turma, None, vec![entrada(9999, StatusFrequencia::Presente, None)]),
    )
    .await;
    assert!(r.is_err());

    let detalhe = aula_service::find_lesson(&c.pool, id).await.unwrap();
    assert_eq!(detalhe.frequencia.len(), 1);
    assert_eq!(detalhe.frequencia[0].aluno_id, c.alunos[0]);
}

#[tokio::test]
async fn editar_sem_data_mantem_a_data_gravada() {
    let c = cenario().await;
    let id = aula_service::create_lesson(&c.pool, &aula(c.turma, Some("2025-03-10T08:00"), vec![]))
        .await
        .unwrap();

    aula_service::update_lesson(&c.pool, id, &aula(c.turma, None, vec![])).await.unwrap();
    let detalhe = aula_service::find_lesson(&c.pool, id).await.unwrap();
    assert_eq!(detalhe.aula.data.to_string(), "2025-03-10 08:00:00");

    aula_service::update_lesson(&c.pool, id, &aula(c.turma, Some("2025-04-01"), vec![])).await.unwrap();
    let detalhe = aula_service::find_lesson(&c.pool, id).await.unwrap();
    assert_eq!(detalhe.aula.data.to_string(), "2025-04-01 00:00:00");
}

#[tokio::test]
async fn diario_lista_mais_recente_primeiro() {
    let c = cenario().await;
    let antiga = aula_service::create_lesson(&c.pool, &aula(c.turma, Some("2025-02-01"), vec![])).await.unwrap();
    let nova = aula_service::create_lesson(&c.pool, &aula(c.turma, Some("2025-03-01"), vec![])).await.unwrap();

    let lista = aula_service::list_lessons(&c.pool, Some(c.turma)).await.unwrap();
    let ids: Vec<_> = lista.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![nova, antiga]);
    assert_eq!(lista[0].turma_nome, "9ºA");
}

#[tokio::test]
async fn aula_em_turma_inexistente_da_not_found() {
    let c = cenario().await;
    let r = aula_service::create_lesson(&c.pool, &aula(404, None, vec![])).await;
    assert!(matches!(r, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn editar_aula_inexistente_da_not_found() {
    let c = cenario().await;
    let r = aula_service::update_lesson(&c.pool, 404, &aula(c.turma, None, vec![])).await;
    assert!(matches!(r, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn estatisticas_contam_cada_tabela() {
    let c = cenario().await;
    aula_service::create_lesson(&c.pool, &aula(c.turma, None, vec![])).await.unwrap();

    let stats = aula_service::statistics(&c.pool).await.unwrap();
    assert_eq!(stats.total_alunos, 4);
    assert_eq!(stats.total_turmas, 1);
    assert_eq!(stats.total_aulas, 1);
}

#[tokio::test]
async fn data_com_fuso_e_data_omitida_ficam_na_mesma_hora_local() {
    let c = cenario().await;
    let uma_hora_atras = (chrono::Local::now() - chrono::Duration::hours(1)).to_rfc3339();
    let antiga = aula_service::create_lesson(&c.pool, &aula(c.turma, Some(&uma_hora_atras), vec![]))
        .await
        .unwrap();
    let agora = aula_service::create_lesson(&c.pool, &aula(c.turma, None, vec![])).await.unwrap();

    let lista = aula_service::list_lessons(&c.pool, Some(c.turma)).await.unwrap();
    let ids: Vec<_> = lista.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![agora, antiga]);

    // O mesmo instante em UTC é gravado na hora local
    let em_utc = chrono::Local::now().with_timezone(&chrono::Utc).with_nanosecond(0).unwrap();
    let id = aula_service::create_lesson(&c.pool, &aula(c.turma, Some(&em_utc.to_rfc3339()), vec![]))
        .await
        .unwrap();
    let detalhe = aula_service::find_lesson(&c.pool, id).await.unwrap();
    assert_eq!(detalhe.aula.data, em_utc.with_timezone(&chrono::Local).naive_local());
}
