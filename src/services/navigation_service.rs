/// Client-side route table. Pure view selection: none of these paths carry
/// a server contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    NewScan,
    ProjectView,
    Results { project_name: String },
    DocResults { filename: String },
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        match path {
            "" => Some(Route::Home),
            "/login" => Some(Route::Login),
            "/newscan" => Some(Route::NewScan),
            "/projectview" => Some(Route::ProjectView),
            _ => {
                if let Some(rest) = path.strip_prefix("/results/") {
                    decode_segment(rest).map(|project_name| Route::Results { project_name })
                } else if let Some(rest) = path.strip_prefix("/docresults/") {
                    decode_segment(rest).map(|filename| Route::DocResults { filename })
                } else {
                    None
                }
            }
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::NewScan => "/newscan".to_string(),
            Route::ProjectView => "/projectview".to_string(),
            Route::Results { project_name } => {
                format!("/results/{}", urlencoding::encode(project_name))
            }
            Route::DocResults { filename } => {
                format!("/docresults/{}", urlencoding::encode(filename))
            }
        }
    }
}

fn decode_segment(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.contains('/') {
        return None;
    }
    urlencoding::decode(raw).ok().map(|s| s.into_owned())
}

/// Where the back button goes from `current`, given the previously visited
/// paths (oldest first, `current` already on top). Results views always
/// return to the project list rather than replaying the scan flow; document
/// views prefer real history so they land on the results view they came
/// from.
pub fn back_target(history: &[String], current: &str) -> String {
    let previous = history
        .iter()
        .rev()
        .find(|p| p.as_str() != current)
        .cloned();

    match Route::parse(current) {
        Some(Route::Results { .. }) => Route::ProjectView.to_path(),
        Some(Route::NewScan) => Route::ProjectView.to_path(),
        Some(Route::DocResults { .. }) => {
            previous.unwrap_or_else(|| Route::ProjectView.to_path())
        }
        Some(Route::ProjectView) => Route::Home.to_path(),
        _ => previous.unwrap_or_else(|| Route::Home.to_path()),
    }
}
