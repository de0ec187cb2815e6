// src/services/aula_service.rs
use crate::{
    error::{AppError, AppResult},
    models::aula::{
        parse_data_aula, Aula, AulaDetalhe, AulaListagem, AulaPayload, Estatisticas, Frequencia,
        FrequenciaEntrada,
    },
};
use chrono::{Local, NaiveDateTime};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::collections::HashSet;

fn validate_lesson(payload: &AulaPayload) -> AppResult<()> {
    if payload.conteudo.trim().is_empty() {
        return Err(AppError::ValidationError("O conteúdo da aula é obrigatório.".into()));
    }
    validate_attendance(&payload.frequencia)
}

/// Cada aluno aparece no máximo uma vez e as notas ficam entre 0 e 10.
pub fn validate_attendance(entradas: &[FrequenciaEntrada]) -> AppResult<()> {
    let mut vistos = HashSet::new();
    for entrada in entradas {
        if !vistos.insert(entrada.aluno_id) {
            return Err(AppError::ValidationError(format!(
                "O aluno {} aparece mais de uma vez na frequência.",
                entrada.aluno_id
            )));
        }
        let nota = entrada.nota_ou_zero();
        if !(0.0..=10.0).contains(&nota) {
            return Err(AppError::ValidationError(format!(
                "Nota inválida para o aluno {}: {} (esperado 0 a 10).",
                entrada.aluno_id, nota
            )));
        }
    }
    Ok(())
}

fn data_informada(payload: &AulaPayload) -> AppResult<Option<NaiveDateTime>> {
    match payload.data.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => parse_data_aula(raw).map(Some).map_err(AppError::ValidationError),
        None => Ok(None),
    }
}

async fn ensure_class_exists(tx: &mut Transaction<'_, Sqlite>, turma_id: i64) -> AppResult<()> {
    let existe: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM turmas WHERE id = ?1)")
        .bind(turma_id)
        .fetch_one(&mut **tx)
        .await?;
    if existe {
        Ok(())
    } else {
        Err(AppError::NotFound("Turma não encontrada".into()))
    }
}

/// Substitui a frequência da aula pelo conjunto recebido.
/// Só aceita alunos matriculados na turma da aula.
async fn replace_attendance(
    tx: &mut Transaction<'_, Sqlite>,
    aula_id: i64,
    turma_id: i64,
    entradas: &[FrequenciaEntrada],
) -> AppResult<()> {
    sqlx::query("DELETE FROM frequencia WHERE aula_id = ?1")
        .bind(aula_id)
        .execute(&mut **tx)
        .await?;

    for entrada in entradas {
        let matriculado: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM alunos WHERE id = ?1 AND turma_id = ?2)",
        )
        .bind(entrada.aluno_id)
        .bind(turma_id)
        .fetch_one(&mut **tx)
        .await?;
        if !matriculado {
            return Err(AppError::ValidationError(format!(
                "O aluno {} não está matriculado na turma {}.",
                entrada.aluno_id, turma_id
            )));
        }

        sqlx::query("INSERT INTO frequencia (aula_id, aluno_id, status, nota) VALUES (?1, ?2, ?3, ?4)")
            .bind(aula_id)
            .bind(entrada.aluno_id)
            .bind(entrada.status)
            .bind(entrada.nota_ou_zero())
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Regista a aula e a sua frequência numa transação. Sem `data`, usa o momento atual.
pub async fn create_lesson(db_pool: &SqlitePool, payload: &AulaPayload) -> AppResult<i64> {
    validate_lesson(payload)?;
    let data = data_informada(payload)?.unwrap_or_else(|| Local::now().naive_local());

    let mut tx = db_pool.begin().await?;
    ensure_class_exists(&mut tx, payload.turma_id).await?;
    let aula_id = sqlx::query(
        r#"
        INSERT INTO aulas (turma_id, titulo, conteudo, objetivos, data)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(payload.turma_id)
    .bind(payload.titulo.as_deref())
    .bind(payload.conteudo.trim())
    .bind(payload.objetivos.as_deref())
    .bind(data)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    if !payload.frequencia.is_empty() {
        replace_attendance(&mut tx, aula_id, payload.turma_id, &payload.frequencia).await?;
    }

    tx.commit().await?;
    tracing::info!(
        "✅ Aula {} registada na turma {} com {} registo(s) de frequência.",
        aula_id,
        payload.turma_id,
        payload.frequencia.len()
    );
    Ok(aula_id)
}

/// Atualiza a aula e troca toda a frequência pela lista recebida (lista vazia apaga tudo).
/// Sem `data`, mantém a data gravada.
pub async fn update_lesson(db_pool: &SqlitePool, aula_id: i64, payload: &AulaPayload) -> AppResult<()> {
    validate_lesson(payload)?;
    let data = data_informada(payload)?;

    let mut tx = db_pool.begin().await?;
    ensure_class_exists(&mut tx, payload.turma_id).await?;
    let rows_affected = sqlx::query(
        r#"
        UPDATE aulas
        SET turma_id = ?1, titulo = ?2, conteudo = ?3, objetivos = ?4,
            data = COALESCE(?5, data)
        WHERE id = ?6
        "#,
    )
    .bind(payload.turma_id)
    .bind(payload.titulo.as_deref())
    .bind(payload.conteudo.trim())
    .bind(payload.objetivos.as_deref())
    .bind(data)
    .bind(aula_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        tx.rollback().await?;
        return Err(AppError::NotFound("Aula não encontrada".into()));
    }

    replace_attendance(&mut tx, aula_id, payload.turma_id, &payload.frequencia).await?;

    tx.commit().await?;
    tracing::info!(
        "✅ Aula {} atualizada; frequência substituída por {} registo(s).",
        aula_id,
        payload.frequencia.len()
    );
    Ok(())
}

/// Diário mais recente primeiro.
pub async fn list_lessons(db_pool: &SqlitePool, turma_id: Option<i64>) -> AppResult<Vec<AulaListagem>> {
    let mut sql = String::from(
        r#"
        SELECT a.id, a.turma_id, a.titulo, a.conteudo, a.objetivos, a.data, t.nome AS turma_nome
        FROM aulas a
        JOIN turmas t ON a.turma_id = t.id
        "#,
    );
    if turma_id.is_some() {
        sql.push_str(" WHERE a.turma_id = ?1");
    }
    sql.push_str(" ORDER BY a.data DESC, a.id DESC");

    let mut query = sqlx::query_as::<_, AulaListagem>(&sql);
    if let Some(id) = turma_id {
        query = query.bind(id);
    }
    Ok(query.fetch_all(db_pool).await?)
}

pub async fn find_lesson(db_pool: &SqlitePool, aula_id: i64) -> AppResult<AulaDetalhe> {
    let aula = sqlx::query_as::<_, Aula>(
        "SELECT id, turma_id, titulo, conteudo, objetivos, data FROM aulas WHERE id = ?1",
    )
    .bind(aula_id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Aula não encontrada".into()))?;

    let frequencia = sqlx::query_as::<_, Frequencia>(
        r#"
        SELECT f.aula_id, f.aluno_id, f.status, f.nota, a.nome AS aluno_nome
        FROM frequencia f
        JOIN alunos a ON f.aluno_id = a.id
        WHERE f.aula_id = ?1
        ORDER BY a.nome
        "#,
    )
    .bind(aula_id)
    .fetch_all(db_pool)
    .await?;

    Ok(AulaDetalhe { aula, frequencia })
}

/// Três contagens lidas separadamente, sem snapshot comum.
pub async fn statistics(db_pool: &SqlitePool) -> AppResult<Estatisticas> {
    let total_alunos: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM alunos")
        .fetch_one(db_pool)
        .await?;
    let total_turmas: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM turmas")
        .fetch_one(db_pool)
        .await?;
    let total_aulas: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM aulas")
        .fetch_one(db_pool)
        .await?;
    Ok(Estatisticas { total_alunos, total_turmas, total_aulas })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::aula::StatusFrequencia;

    fn entrada(aluno_id: i64, nota: Option<f64>) -> FrequenciaEntrada {
        FrequenciaEntrada { aluno_id, status: StatusFrequencia::Presente, nota }
    }

    #[test]
    fn frequencia_vazia_e_valida() {
        assert!(validate_attendance(&[]).is_ok());
    }

    #[test]
    fn aluno_repetido_e_rejeitado() {
        let r = validate_attendance(&[entrada(1, None), entrada(1, Some(5.0))]);
        assert!(matches!(r, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn notas_fora_de_zero_a_dez_sao_rejeitadas() {
        assert!(validate_attendance(&[entrada(1, Some(10.0)), entrada(2, Some(0.0))]).is_ok());
        assert!(validate_attendance(&[entrada(1, Some(10.5))]).is_err());
        assert!(validate_attendance(&[entrada(1, Some(-0.1))]).is_err());
        assert!(validate_attendance(&[entrada(1, Some(f64::NAN))]).is_err());
    }
}
