// src/models/aula.rs
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum StatusFrequencia {
    Presente,
    Ausente,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Aula {
    pub id: i64,
    pub turma_id: i64,
    pub titulo: Option<String>,
    pub conteudo: String,
    pub objetivos: Option<String>,
    pub data: NaiveDateTime,
}

/// Entrada do diário com o nome da turma (listagem).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AulaListagem {
    pub id: i64,
    pub turma_id: i64,
    pub titulo: Option<String>,
    pub conteudo: String,
    pub objetivos: Option<String>,
    pub data: NaiveDateTime,
    pub turma_nome: String,
}

/// Registo de frequência/nota com o nome do aluno.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Frequencia {
    pub aula_id: i64,
    pub aluno_id: i64,
    pub status: StatusFrequencia,
    pub nota: f64,
    pub aluno_nome: String,
}

/// Aula com a lista completa de frequência (GET /api/aulas/:id).
#[derive(Debug, Clone, Serialize)]
pub struct AulaDetalhe {
    #[serde(flatten)]
    pub aula: Aula,
    pub frequencia: Vec<Frequencia>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrequenciaEntrada {
    pub aluno_id: i64,
    pub status: StatusFrequencia,
    #[serde(default)]
    pub nota: Option<f64>,
}

impl FrequenciaEntrada {
    pub fn nota_ou_zero(&self) -> f64 {
        self.nota.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AulaPayload {
    pub turma_id: i64,
    #[serde(default)]
    pub titulo: Option<String>,
    pub conteudo: String,
    #[serde(default)]
    pub objetivos: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub frequencia: Vec<FrequenciaEntrada>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AulaFiltro {
    pub turma_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Estatisticas {
    pub total_alunos: i64,
    pub total_turmas: i64,
    pub total_aulas: i64,
}

/// Interpreta a data enviada pelo cliente para uma aula.
///
/// Aceita RFC 3339 (convertido para a hora local do servidor), `YYYY-MM-DDTHH:MM[:SS]`,
/// `YYYY-MM-DD HH:MM[:SS]` e `YYYY-MM-DD` (meia-noite). Datas sem fuso já são locais.
pub fn parse_data_aula(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("Data da aula inválida: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn data_rfc3339_fica_na_hora_local() {
        let agora = Local::now();
        let dt = parse_data_aula(&agora.to_rfc3339()).unwrap();
        assert_eq!(dt, agora.naive_local());

        // O mesmo instante noutro fuso dá a mesma hora local
        let utc = agora.with_timezone(&chrono::Utc).to_rfc3339();
        assert_eq!(parse_data_aula(&utc).unwrap(), agora.naive_local());
    }

    #[test]
    fn data_de_input_datetime_local() {
        let dt = parse_data_aula("2025-03-10T08:15").unwrap();
        assert_eq!((dt.day(), dt.hour(), dt.minute()), (10, 8, 15));
    }

    #[test]
    fn data_sem_hora_fica_a_meia_noite() {
        let dt = parse_data_aula("2025-03-10").unwrap();
        assert_eq!((dt.month(), dt.hour()), (3, 0));
    }

    #[test]
    fn data_invalida_e_rejeitada() {
        assert!(parse_data_aula("10/03/2025").is_err());
    }

    #[test]
    fn nota_omitida_vale_zero() {
        let f: FrequenciaEntrada =
            serde_json::from_str(r#"{"aluno_id":3,"status":"ausente"}"#).unwrap();
        assert_eq!(f.nota_ou_zero(), 0.0);
        assert_eq!(f.status, StatusFrequencia::Ausente);
    }

    #[test]
    fn status_fora_dos_dois_valores_falha() {
        let r = serde_json::from_str::<FrequenciaEntrada>(r#"{"aluno_id":3,"status":"atrasado"}"#);
        assert!(r.is_err());
    }

    #[test]
    fn estatisticas_usam_chaves_camel_case() {
        let v = serde_json::to_value(Estatisticas { total_alunos: 3, total_turmas: 2, total_aulas: 1 })
            .unwrap();
        assert_eq!(v["totalAlunos"], 3);
        assert_eq!(v["totalTurmas"], 2);
        assert_eq!(v["totalAulas"], 1);
    }
}
