use recipebox::recipes::dto::CreateRecipe;
use recipebox::recipes::services::create_recipe;
use recipebox::users::profile;
use recipebox::{
    AppState, ConstraintKind, ModelError, NewRecipe, NewUser, RegisterUser, UserService,
    ValidationError,
};

fn register_req(username: &str, password: &str) -> RegisterUser {
    RegisterUser {
        username: username.into(),
        password: password.into(),
        ..RegisterUser::default()
    }
}

#[tokio::test]
async fn alice_password_scenario() {
    let state = AppState::ephemeral().await.unwrap();
    let users = UserService::new(state.users());

    let alice = users.register(register_req("alice", "hunter22")).await.unwrap();
    assert!(alice.verify_password("hunter22"));
    assert!(!alice.verify_password("wrong"));

    let reloaded = state.users().find_by_username("alice").await.unwrap().unwrap();
    assert!(reloaded.verify_password("hunter22"));
    assert!(!reloaded.verify_password("wrong"));
}

#[tokio::test]
async fn instructions_boundary_scenario() {
    let state = AppState::ephemeral().await.unwrap();
    let repo = state.recipes();

    let mut recipe = NewRecipe::new();
    recipe.set_title("Risotto").unwrap();
    recipe.instructions = Some("r".repeat(49));
    let err = repo.insert(&recipe).await.unwrap_err();
    assert!(matches!(
        err,
        ModelError::StorageConstraint(ref c) if c.kind == ConstraintKind::Check
    ));

    recipe.instructions = Some("r".repeat(50));
    let created = repo.insert(&recipe).await.unwrap();
    assert_eq!(created.title(), "Risotto");
}

#[tokio::test]
async fn empty_fields_fail_validation() {
    let state = AppState::ephemeral().await.unwrap();
    let users = UserService::new(state.users());

    let mut draft = NewUser::new();
    let err = users.set_username(&mut draft, "").await.unwrap_err();
    assert_eq!(err.as_validation(), Some(ValidationError::UsernameMissing));

    let mut recipe = NewRecipe::new();
    assert_eq!(recipe.set_title(""), Err(ValidationError::TitleMissing));
}

#[tokio::test]
async fn every_used_username_is_rejected() {
    let state = AppState::ephemeral().await.unwrap();
    let users = UserService::new(state.users());
    let names = ["alice", "bob", "Carol", "d a v e", "ünïcödé"];

    for name in names {
        users.register(register_req(name, "pw")).await.unwrap();
    }
    for name in names {
        let mut draft = NewUser::new();
        let err = users.set_username(&mut draft, name).await.unwrap_err();
        assert_eq!(err.as_validation(), Some(ValidationError::UsernameTaken), "{name}");
    }
    // usernames compare case-sensitively
    let mut draft = NewUser::new();
    users.set_username(&mut draft, "carol").await.unwrap();
}

#[tokio::test]
async fn profile_lists_owned_recipes() {
    let state = AppState::ephemeral().await.unwrap();
    let alice = UserService::new(state.users())
        .register(register_req("alice", "hunter22"))
        .await
        .unwrap();

    for title in ["Soup", "Salad"] {
        create_recipe(
            &state.recipes(),
            CreateRecipe {
                title: title.into(),
                instructions: Some(format!("{title}: {}", "step ".repeat(12))),
                user_id: Some(alice.id),
                ..CreateRecipe::default()
            },
        )
        .await
        .unwrap();
    }

    let profile = profile(&state.users(), alice.id).await.unwrap();
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(json["username"], "alice");
    let titles: Vec<_> = json["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Soup", "Salad"]);
    assert!(!json.to_string().contains("argon2"));
}

#[tokio::test]
async fn profile_of_missing_user_is_not_found() {
    let state = AppState::ephemeral().await.unwrap();
    let err = profile(&state.users(), 5).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound { entity: "user", id: 5 }));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn long_username_and_title_commit() {
    let state = AppState::ephemeral().await.unwrap();
    let name = "u".repeat(65);
    let user = UserService::new(state.users())
        .register(register_req(&name, "pw"))
        .await
        .unwrap();
    let loaded = state.users().find_by_username(&name).await.unwrap().unwrap();
    assert_eq!(loaded.id, user.id);
    assert_eq!(loaded.username(), name);

    let mut recipe = NewRecipe::new();
    recipe.set_title("t".repeat(129)).unwrap();
    recipe.user_id = Some(user.id);
    let created = state.recipes().insert(&recipe).await.unwrap();
    assert_eq!(created.title().chars().count(), 129);
}
