//! Auxiliary files synthesized after the generators ran.
//!
//! Everything here is a pure function of the project spec. Writing the
//! results is the materializer's job.

use crate::domain::{
    entities::{common::RelativePath, project::ProjectSpec},
    value_objects::PackageManager,
};

pub const SERVER_PORT: u16 = 3000;
pub const CLIENT_PORT: u16 = 5173;

/// The manifest `scripts` block: name, command, readme description.
pub const SCRIPTS: [(&str, &str, &str); 18] = [
    (
        "dev",
        "nx run-many --target=serve --projects=server,client --parallel",
        "start server and client in watch mode",
    ),
    ("dev:server", "nx serve server", "start only the NestJS server"),
    ("dev:client", "nx serve client", "start only the React client"),
    ("build", "nx run-many --target=build --all", "build every project"),
    ("build:server", "nx build server", "build the server"),
    ("build:client", "nx build client", "build the client"),
    ("start", "node dist/server/main.js", "run the built server"),
    (
        "start:prod",
        "NODE_ENV=production node dist/server/main.js",
        "run the built server in production mode",
    ),
    ("test", "nx run-many --target=test --all", "run every test suite"),
    ("test:server", "nx test server", "run the server tests"),
    ("test:client", "nx test client", "run the client tests"),
    ("lint", "nx run-many --target=lint --all", "lint every project"),
    ("lint:server", "nx lint server", "lint the server"),
    ("lint:client", "nx lint client", "lint the client"),
    ("docker:build", "docker compose build", "build the container images"),
    ("docker:up", "docker compose up -d", "start the containers in the background"),
    ("docker:down", "docker compose down", "stop the containers"),
    ("graph", "nx graph", "open the Nx project graph"),
];

/// A file to write, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: RelativePath,
    pub contents: String,
}

/// Container files, present only when container config was requested.
pub fn container_artifacts(spec: &ProjectSpec) -> Vec<Artifact> {
    if !spec.options().add_container_config {
        return Vec::new();
    }
    let pm = spec.options().package_manager;
    vec![
        Artifact {
            path: RelativePath::from_static("docker-compose.yml"),
            contents: compose_file(),
        },
        Artifact {
            path: RelativePath::from_static("server/Dockerfile"),
            contents: dockerfile("server", SERVER_PORT, pm),
        },
        Artifact {
            path: RelativePath::from_static("client/Dockerfile"),
            contents: dockerfile("client", CLIENT_PORT, pm),
        },
    ]
}

fn compose_file() -> String {
    format!(
        "services:
  server:
    build:
      context: .
      dockerfile: server/Dockerfile
    ports:
      - \"{SERVER_PORT}:{SERVER_PORT}\"
    environment:
      - NODE_ENV=development

  client:
    build:
      context: .
      dockerfile: client/Dockerfile
    ports:
      - \"{CLIENT_PORT}:{CLIENT_PORT}\"
    depends_on:
      - server
"
    )
}

fn dockerfile(app: &str, port: u16, pm: PackageManager) -> String {
    let (exec, prefix) = pm.exec_prefix();
    let cmd: Vec<String> = std::iter::once(exec)
        .chain(prefix.iter().copied())
        .chain(["nx", "serve", app, "--host=0.0.0.0"])
        .map(|part| format!("\"{part}\""))
        .collect();
    let corepack = match pm {
        PackageManager::Npm => "",
        PackageManager::Yarn | PackageManager::Pnpm => "RUN corepack enable\n",
    };
    let build = std::iter::once(exec)
        .chain(prefix.iter().copied())
        .chain(["nx", "build", app])
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "FROM node:20-alpine

WORKDIR /app
{corepack}
COPY . .
RUN {install}
RUN {build}

EXPOSE {port}

CMD [{cmd}]
",
        install = pm.install_command(),
        cmd = cmd.join(", "),
    )
}

/// The project readme. Lists one bullet per script, in manifest order.
pub fn readme(spec: &ProjectSpec) -> String {
    let name = spec.name();
    let pm = spec.options().package_manager;

    let mut out = format!(
        "# {name}

{name} is a full-stack monorepo with a NestJS server and a React client, managed by Nx.

## Getting started

```bash
cd {name}
{install}
{dev}
```

The server listens on http://localhost:{SERVER_PORT} and the client on http://localhost:{CLIENT_PORT}.

## Scripts

",
        install = pm.install_command(),
        dev = pm.run_script("dev"),
    );
    for (script, _, description) in SCRIPTS {
        out.push_str(&format!("- `{}`: {description}\n", pm.run_script(script)));
    }
    out.push_str(
        "
## Project layout

- `server/`: NestJS application
- `client/`: React application
",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::project::ConfigOptions,
        value_objects::{ProjectName, Strategy},
    };

    fn spec(options: ConfigOptions) -> ProjectSpec {
        ProjectSpec::new(
            ProjectName::parse("demo-app").unwrap(),
            "/work",
            Strategy::GeneratorPipeline,
            options,
        )
        .unwrap()
    }

    #[test]
    fn eighteen_unique_scripts() {
        let mut names: Vec<&str> = SCRIPTS.iter().map(|(n, _, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 18);
    }

    #[test]
    fn no_container_files_when_disabled() {
        let artifacts = container_artifacts(&spec(ConfigOptions {
            add_container_config: false,
            ..ConfigOptions::default()
        }));
        assert!(artifacts.is_empty());
    }

    #[test]
    fn compose_wires_client_to_server() {
        let artifacts = container_artifacts(&spec(ConfigOptions::default()));
        let compose = &artifacts[0].contents;
        assert!(compose.contains("\"3000:3000\""));
        assert!(compose.contains("\"5173:5173\""));
        assert!(compose.contains("depends_on:\n      - server"));
    }

    #[test]
    fn dockerfiles_expose_their_port_and_serve() {
        let artifacts = container_artifacts(&spec(ConfigOptions::default()));
        let server = &artifacts[1];
        assert_eq!(server.path.to_string(), "server/Dockerfile");
        assert!(server.contents.starts_with("FROM node:20-alpine"));
        assert!(server.contents.contains("EXPOSE 3000"));
        assert!(server
            .contents
            .contains(r#"CMD ["npx", "nx", "serve", "server", "--host=0.0.0.0"]"#));
        assert!(artifacts[2].contents.contains("EXPOSE 5173"));
    }

    #[test]
    fn pnpm_dockerfile_enables_corepack() {
        let artifacts = container_artifacts(&spec(ConfigOptions {
            package_manager: PackageManager::Pnpm,
            ..ConfigOptions::default()
        }));
        let client = &artifacts[2].contents;
        assert!(client.contains("RUN corepack enable"));
        assert!(client.contains("RUN pnpm install"));
        assert!(client.contains(r#"CMD ["pnpm", "exec", "nx", "serve", "client""#));
    }

    #[test]
    fn readme_lists_every_script_in_order() {
        let text = readme(&spec(ConfigOptions::default()));
        assert!(text.starts_with("# demo-app\n\ndemo-app is a full-stack monorepo"));
        let mut last = 0;
        for (script, _, _) in SCRIPTS {
            let bullet = format!("- `npm run {script}`:");
            let pos = text.find(&bullet).unwrap_or_else(|| panic!("missing {script}"));
            assert!(pos > last, "{script} out of order");
            last = pos;
        }
    }
}
