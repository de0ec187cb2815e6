// src/web/routes.rs
use crate::{
    politica::Capacidade,
    state::AppState,
    web::{
        aluno_handlers, auth_handlers, aula_handlers, conta_handlers, mw_auth, mw_politica,
        painel_handlers, turma_handlers, unidade_handlers,
    },
};
use axum::{
    middleware,
    response::Redirect,
    routing::{get, post, put},
    Router,
};

/// Aplica a verificação de capacidade a todas as rotas do grupo.
fn com_capacidade(rotas: Router<AppState>, capacidade: Capacidade) -> Router<AppState> {
    rotas.route_layer(middleware::from_fn_with_state(
        capacidade,
        mw_politica::require_capability,
    ))
}

fn api_router() -> Router<AppState> {
    let consultar_unidades = Router::new()
        .route("/unidades", get(unidade_handlers::list_units))
        .route("/unidades/{id}", get(unidade_handlers::get_unit))
        .route("/users/{id}/units", get(conta_handlers::user_units))
        .route("/coordinators/{id}/units", get(conta_handlers::coordinator_units))
        .route("/instructors/{id}/units", get(conta_handlers::instructor_units));

    let gerir_unidades = Router::new()
        .route("/unidades", post(unidade_handlers::create_unit))
        .route("/unidades/{id}", put(unidade_handlers::update_unit));

    let gerir_coordenadores = Router::new()
        .route(
            "/coordinators",
            get(conta_handlers::list_coordinators).post(conta_handlers::create_coordinator),
        )
        .route(
            "/coordinators/{id}",
            get(conta_handlers::get_coordinator).put(conta_handlers::update_coordinator),
        );

    let gerir_instrutores = Router::new()
        .route(
            "/instructors",
            get(conta_handlers::list_instructors).post(conta_handlers::create_instructor),
        )
        .route(
            "/instructors/{id}",
            get(conta_handlers::get_instructor).put(conta_handlers::update_instructor),
        );

    let consultar_turmas = Router::new()
        .route("/turmas", get(turma_handlers::list_classes))
        .route("/turmas/{id}", get(turma_handlers::get_class))
        .route("/turmas/{id}/alunos", get(turma_handlers::class_students))
        .route("/alunos", get(aluno_handlers::list_students))
        .route("/alunos/{id}", get(aluno_handlers::get_student))
        .route("/aulas", get(aula_handlers::list_lessons))
        .route("/aulas/{id}", get(aula_handlers::get_lesson));

    let gerir_turmas = Router::new()
        .route("/turmas", post(turma_handlers::create_class))
        .route(
            "/turmas/{id}",
            put(turma_handlers::update_class).delete(turma_handlers::delete_class),
        )
        .route("/alunos", post(aluno_handlers::create_student))
        .route("/alunos/{id}", put(aluno_handlers::update_student));

    let gerir_diario = Router::new()
        .route("/aulas", post(aula_handlers::create_lesson))
        .route("/aulas/{id}", put(aula_handlers::update_lesson));

    let estatisticas = Router::new().route("/estatisticas", get(aula_handlers::statistics));

    let sessao = Router::new()
        .route("/logout", post(auth_handlers::api_logout))
        .route("/me", get(auth_handlers::api_me));

    // Grupos com o mesmo caminho e métodos diferentes são fundidos pelo merge
    let autenticadas = Router::new()
        .merge(com_capacidade(consultar_unidades, Capacidade::ConsultarUnidades))
        .merge(com_capacidade(gerir_unidades, Capacidade::GerirUnidades))
        .merge(com_capacidade(gerir_coordenadores, Capacidade::GerirCoordenadores))
        .merge(com_capacidade(gerir_instrutores, Capacidade::GerirInstrutores))
        .merge(com_capacidade(consultar_turmas, Capacidade::ConsultarTurmas))
        .merge(com_capacidade(gerir_turmas, Capacidade::GerirTurmas))
        .merge(com_capacidade(gerir_diario, Capacidade::GerirDiario))
        .merge(com_capacidade(estatisticas, Capacidade::ConsultarEstatisticas))
        .merge(sessao)
        .route_layer(middleware::from_fn(mw_auth::require_auth));

    Router::new()
        .route("/login", post(auth_handlers::api_login))
        .merge(autenticadas)
}

/// Router completo da aplicação. As camadas de sessão e tracing são aplicadas por quem chama.
pub fn create_router(app_state: AppState) -> Router {
    let paginas_publicas = Router::new()
        .route(
            "/login",
            get(auth_handlers::show_login_form).post(auth_handlers::handle_login_form),
        )
        .route("/logout", get(auth_handlers::handle_logout))
        .route("/", get(|| async { Redirect::to("/painel") }));

    let paginas_autenticadas = Router::new()
        .route("/painel", get(painel_handlers::painel_handler))
        .route("/painel/{secao}", get(painel_handlers::secao_handler))
        .route_layer(middleware::from_fn(mw_auth::require_auth_page));

    Router::new()
        .merge(paginas_publicas)
        .merge(paginas_autenticadas)
        .nest("/api", api_router())
        .with_state(app_state)
}
