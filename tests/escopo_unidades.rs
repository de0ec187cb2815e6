mod common;

use common::*;
use gestao_escolar::{
    error::AppError,
    models::usuario::{Role, SessaoUsuario},
    services::escopo_service,
};

fn ids(unidades: &[gestao_escolar::models::unidade::Unidade]) -> Vec<i64> {
    unidades.iter().map(|u| u.id).collect()
}

#[tokio::test]
async fn coordenador_ve_exatamente_as_unidades_vinculadas() {
    let pool = setup_pool().await;
    let norte = nova_unidade(&pool, "Escola Norte").await;
    let sul = nova_unidade(&pool, "Escola Sul").await;
    let leste = nova_unidade(&pool, "Escola Leste").await;

    let coord = nova_conta(&pool, Role::Coordenador, "Carla", "senha", &[norte, leste]).await;
    // Vínculo de instrutor à unidade sul não pode vazar para o coordenador
    nova_conta(&pool, Role::Instrutor, "Ivo", "senha", &[sul]).await;

    let unidades = escopo_service::units_for_user(&pool, coord).await.unwrap();
    assert_eq!(ids(&unidades), vec![norte, leste]);
}

#[tokio::test]
async fn instrutor_usa_a_tabela_de_instrutores() {
    let pool = setup_pool().await;
    let norte = nova_unidade(&pool, "Escola Norte").await;
    let sul = nova_unidade(&pool, "Escola Sul").await;

    nova_conta(&pool, Role::Coordenador, "Carla", "senha", &[norte]).await;
    let inst = nova_conta(&pool, Role::Instrutor, "Ivo", "senha", &[sul]).await;

    let unidades = escopo_service::units_for_user(&pool, inst).await.unwrap();
    assert_eq!(ids(&unidades), vec![sul]);
    assert_eq!(unidades[0].escola, "Escola Sul");
}

#[tokio::test]
async fn ceo_tem_escopo_vazio() {
    let pool = setup_pool().await;
    nova_unidade(&pool, "Escola Norte").await;
    let ceo = nova_conta(&pool, Role::Ceo, "Diretora", "senha", &[]).await;

    let unidades = escopo_service::units_for_user(&pool, ceo).await.unwrap();
    assert!(unidades.is_empty());
}

#[tokio::test]
async fn conta_sem_vinculos_devolve_lista_vazia() {
    let pool = setup_pool().await;
    let coord = nova_conta(&pool, Role::Coordenador, "Carla", "senha", &[]).await;

    let unidades = escopo_service::units_for_user(&pool, coord).await.unwrap();
    assert!(unidades.is_empty());
}

#[tokio::test]
async fn conta_inexistente_da_not_found() {
    let pool = setup_pool().await;
    let r = escopo_service::units_for_user(&pool, 999).await;
    assert!(matches!(r, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn verificacao_de_escopo_por_funcao() {
    let pool = setup_pool().await;
    let norte = nova_unidade(&pool, "Escola Norte").await;
    let sul = nova_unidade(&pool, "Escola Sul").await;
    let coord = nova_conta(&pool, Role::Coordenador, "Carla", "senha", &[norte]).await;

    let sessao = SessaoUsuario { id: coord, usuario: "Carla".into(), role: Role::Coordenador };
    assert!(escopo_service::ensure_unit_in_scope(&pool, &sessao, norte).await.is_ok());
    assert!(matches!(
        escopo_service::ensure_unit_in_scope(&pool, &sessao, sul).await,
        Err(AppError::Forbidden)
    ));

    let ceo = SessaoUsuario { id: 1000, usuario: "Diretora".into(), role: Role::Ceo };
    assert!(escopo_service::ensure_unit_in_scope(&pool, &ceo, sul).await.is_ok());
}
