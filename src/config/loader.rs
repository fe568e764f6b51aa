//! Configuration directory scan
//!
//! One call to [`ConfigLoader::load_config_files`] runs the environment
//! checks, reads every server file in the configuration directory and
//! rebuilds the server list and the command index. Problems never escape as
//! errors: they end up in the returned [`LoadStatus`] and in the log.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::flatten_lines;
use crate::storage::{ConfigScanner, FsScanner, LocalStorage, StorageProbe};

use super::{Command, Server, ServerMapper};

/// Name of the configuration directory under the storage root
pub const CONFIG_DIR: &str = "SSH-Shortcuts";

/// Accepted configuration file extensions (exact match)
pub const CONFIG_EXTENSIONS: [&str; 2] = ["json", "JSON"];

/// Outcome of one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadStatus {
    Success,
    /// Two commands share an identifier; the first one seen wins
    AmbiguousId,
    /// At least one file could not be read, parsed or validated
    Error,
    PermissionDenied,
    CannotReadExternalStorage,
    CannotCreateConfigDir,
}

impl LoadStatus {
    pub fn is_success(self) -> bool {
        self == LoadStatus::Success
    }

    /// Remediation hint for the user
    pub fn message(self) -> &'static str {
        match self {
            LoadStatus::Success => "Конфигурация загружена",
            LoadStatus::AmbiguousId => {
                "Несколько команд используют один id; по id доступна только первая из них"
            }
            LoadStatus::Error => "Часть файлов серверов не загружена, подробности в журнале",
            LoadStatus::PermissionDenied => "Нет доступа к хранилищу; выдайте разрешение на чтение и повторите",
            LoadStatus::CannotReadExternalStorage => "Хранилище недоступно; подключите его и повторите",
            LoadStatus::CannotCreateConfigDir => {
                "Не удалось создать директорию конфигурации; проверьте, что хранилище доступно для записи"
            }
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Loads server profiles from the configuration directory
pub struct ConfigLoader {
    config_dir: PathBuf,
    probe: Box<dyn StorageProbe>,
    scanner: Box<dyn ConfigScanner>,
    mapper: ServerMapper,
    servers: Vec<Server>,
    commands_by_id: HashMap<u32, Command>,
    /// Index into `servers` of the server each indexed command came from
    command_owners: HashMap<u32, usize>,
}

impl ConfigLoader {
    /// Loader for `<storage_root>/SSH-Shortcuts` on the local filesystem
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        let storage_root = storage_root.into();
        let config_dir = storage_root.join(CONFIG_DIR);
        Self::with_parts(
            config_dir,
            Box::new(LocalStorage::new(storage_root)),
            Box::new(FsScanner),
        )
    }

    /// Loader with explicit collaborators
    pub fn with_parts(
        config_dir: impl Into<PathBuf>,
        probe: Box<dyn StorageProbe>,
        scanner: Box<dyn ConfigScanner>,
    ) -> Self {
        Self {
            config_dir: config_dir.into(),
            probe,
            scanner,
            mapper: ServerMapper::new(),
            servers: Vec::new(),
            commands_by_id: HashMap::new(),
            command_owners: HashMap::new(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Servers from the last completed load, sorted
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn command_by_id(&self, id: u32) -> Option<&Command> {
        self.commands_by_id.get(&id)
    }

    /// Server that owns the command registered under `id`
    pub fn server_for_command(&self, id: u32) -> Option<&Server> {
        let index = *self.command_owners.get(&id)?;
        self.servers.get(index)
    }

    /// Scan the configuration directory and rebuild the in-memory state
    pub fn load_config_files(&mut self) -> LoadStatus {
        if !self.probe.is_readable() {
            warn!("storage is not readable");
            return LoadStatus::CannotReadExternalStorage;
        }

        if !self.probe.permission_granted() {
            warn!("storage permission not granted");
            return LoadStatus::PermissionDenied;
        }

        if !self.config_dir.is_dir() {
            return self.create_config_dir();
        }

        self.clear();

        let files = match self.scanner.list_files(&self.config_dir, &CONFIG_EXTENSIONS) {
            Ok(files) => files,
            Err(e) => {
                error!(
                    dir = %self.config_dir.display(),
                    "{}",
                    flatten_lines(&e.to_string())
                );
                return LoadStatus::Error;
            }
        };

        let mut status = LoadStatus::Success;
        for path in files {
            debug!(file = %path.display(), "reading server file");

            let server = match self.mapper.read_file(&path) {
                Ok(server) => server,
                Err(e) => {
                    status = LoadStatus::Error;
                    error!(file = %path.display(), "{}", e.log_line());
                    continue;
                }
            };

            for command in server.commands.iter() {
                let Some(id) = command.id else { continue };

                if self.commands_by_id.contains_key(&id) {
                    if status == LoadStatus::Success {
                        status = LoadStatus::AmbiguousId;
                    }
                    warn!(id, server = %server.name, "ambiguous command id");
                } else {
                    self.commands_by_id.insert(id, command.clone());
                    self.command_owners.insert(id, self.servers.len());
                }
            }

            self.servers.push(server);
        }

        self.sort_servers();

        info!(
            servers = self.servers.len(),
            commands = self.commands_by_id.len(),
            ?status,
            "configuration loaded"
        );
        status
    }

    /// First run: the directory does not exist yet, so there is nothing to scan
    fn create_config_dir(&mut self) -> LoadStatus {
        if !self.probe.is_writable() {
            warn!(dir = %self.config_dir.display(), "storage is not writable");
            return LoadStatus::CannotCreateConfigDir;
        }

        if let Err(e) = fs::create_dir_all(&self.config_dir) {
            error!(
                dir = %self.config_dir.display(),
                "{}",
                flatten_lines(&e.to_string())
            );
            return LoadStatus::CannotCreateConfigDir;
        }

        info!(dir = %self.config_dir.display(), "created configuration directory");
        self.clear();
        LoadStatus::Success
    }

    fn clear(&mut self) {
        self.servers.clear();
        self.commands_by_id.clear();
        self.command_owners.clear();
    }

    /// Sort servers and move the owner indices along with them
    fn sort_servers(&mut self) {
        let mut indexed: Vec<(usize, Server)> = self.servers.drain(..).enumerate().collect();
        indexed.sort_by(|a, b| a.1.cmp(&b.1));

        let mut position = vec![0; indexed.len()];
        for (sorted, (loaded, _)) in indexed.iter().enumerate() {
            position[*loaded] = sorted;
        }
        for owner in self.command_owners.values_mut() {
            *owner = position[*owner];
        }

        self.servers = indexed.into_iter().map(|(_, server)| server).collect();
    }
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("config_dir", &self.config_dir)
            .field("servers", &self.servers.len())
            .field("commands_by_id", &self.commands_by_id.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Probe with fixed answers that counts how often it was asked
    struct FakeProbe {
        readable: bool,
        writable: bool,
        permission: bool,
        calls: Arc<AtomicUsize>,
    }

    impl FakeProbe {
        fn ok() -> Self {
            Self {
                readable: true,
                writable: true,
                permission: true,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl StorageProbe for FakeProbe {
        fn is_readable(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.readable
        }

        fn is_writable(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.writable
        }

        fn permission_granted(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.permission
        }
    }

    /// Scanner that fails the test if it is ever used
    struct PanickingScanner;

    impl ConfigScanner for PanickingScanner {
        fn list_files(&self, _dir: &Path, _extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
            panic!("directory must not be scanned");
        }
    }

    struct FailingScanner;

    impl ConfigScanner for FailingScanner {
        fn list_files(&self, _dir: &Path, _extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
            Err(io::Error::new(io::ErrorKind::Other, "listing\nfailed"))
        }
    }

    fn server_json(name: &str, ids: &[u32]) -> String {
        let commands: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{ "id": {id}, "name": "cmd {id}", "cmd": "echo {name} {id}" }}"#))
            .collect();
        format!(
            r#"{{ "name": "{name}", "host": "{name}.example.org", "user": "root", "commands": [{}] }}"#,
            commands.join(",")
        )
    }

    fn write(dir: &Path, file: &str, content: &str) {
        fs::write(dir.join(file), content).unwrap();
    }

    fn loader_in(root: &Path) -> ConfigLoader {
        ConfigLoader::with_parts(root.join(CONFIG_DIR), Box::new(FakeProbe::ok()), Box::new(FsScanner))
    }

    fn names(loader: &ConfigLoader) -> Vec<String> {
        loader.servers().iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_valid_files_load_sorted() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        write(&dir, "1.json", &server_json("zulu", &[1, 2]));
        write(&dir, "2.JSON", &server_json("alpha", &[3]));
        write(&dir, "3.json", &server_json("mike", &[]));

        let mut loader = loader_in(root.path());
        assert_eq!(loader.load_config_files(), LoadStatus::Success);

        assert_eq!(names(&loader), vec!["alpha", "mike", "zulu"]);
        for id in [1, 2, 3] {
            assert!(loader.command_by_id(id).is_some(), "id {} missing", id);
        }
        assert!(loader.command_by_id(4).is_none());
    }

    #[test]
    fn test_duplicate_id_is_ambiguous_and_first_wins() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        write(&dir, "a.json", &server_json("second", &[5]));
        write(&dir, "b.json", &server_json("first", &[5]));

        let mut loader = loader_in(root.path());
        assert_eq!(loader.load_config_files(), LoadStatus::AmbiguousId);

        assert_eq!(names(&loader), vec!["first", "second"]);
        // a.json is enumerated first
        assert_eq!(loader.command_by_id(5).unwrap().cmd, "echo second 5");
        assert_eq!(loader.server_for_command(5).unwrap().name, "second");
    }

    #[test]
    fn test_owner_of_identical_duplicate_is_first_seen() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        let command = r#"{ "id": 5, "name": "Up", "cmd": "uptime", "sudo": true }"#;
        write(
            &dir,
            "a.json",
            &format!(r#"{{ "name": "zulu", "host": "z", "user": "u", "sudoPath": "/opt/sudo", "commands": [{command}] }}"#),
        );
        write(
            &dir,
            "b.json",
            &format!(r#"{{ "name": "alpha", "host": "a", "user": "u", "commands": [{command}] }}"#),
        );

        let mut loader = loader_in(root.path());
        assert_eq!(loader.load_config_files(), LoadStatus::AmbiguousId);
        assert_eq!(names(&loader), vec!["alpha", "zulu"]);

        let owner = loader.server_for_command(5).unwrap();
        assert_eq!(owner.name, "zulu");
        let command = loader.command_by_id(5).unwrap();
        assert_eq!(owner.shell_line(command), "/opt/sudo uptime");
    }

    #[test]
    fn test_owners_follow_sorted_servers() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        write(&dir, "1.json", &server_json("zulu", &[1]));
        write(&dir, "2.json", &server_json("mike", &[2]));
        write(&dir, "3.json", &server_json("alpha", &[3]));

        let mut loader = loader_in(root.path());
        assert_eq!(loader.load_config_files(), LoadStatus::Success);

        assert_eq!(loader.server_for_command(1).unwrap().name, "zulu");
        assert_eq!(loader.server_for_command(2).unwrap().name, "mike");
        assert_eq!(loader.server_for_command(3).unwrap().name, "alpha");
        assert!(loader.server_for_command(4).is_none());
    }

    #[test]
    fn test_broken_file_is_error_and_others_still_load() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        write(&dir, "a.json", &server_json("alpha", &[1]));
        write(&dir, "b.json", "{ \"name\": \"broken\",\n\"host\": ");
        write(&dir, "c.json", &server_json("charlie", &[2]));

        let mut loader = loader_in(root.path());
        assert_eq!(loader.load_config_files(), LoadStatus::Error);

        assert_eq!(names(&loader), vec!["alpha", "charlie"]);
        assert!(loader.command_by_id(1).is_some());
        assert!(loader.command_by_id(2).is_some());
    }

    #[test]
    fn test_validation_failure_is_error() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        write(&dir, "a.json", r#"{ "name": "", "host": "h", "user": "u" }"#);

        let mut loader = loader_in(root.path());
        assert_eq!(loader.load_config_files(), LoadStatus::Error);
        assert!(loader.servers().is_empty());
    }

    #[test]
    fn test_error_outranks_ambiguous_id() {
        for broken_first in [true, false] {
            let root = tempfile::tempdir().unwrap();
            let dir = root.path().join(CONFIG_DIR);
            fs::create_dir(&dir).unwrap();
            let (broken, dup_a, dup_b) = if broken_first {
                ("a.json", "b.json", "c.json")
            } else {
                ("c.json", "a.json", "b.json")
            };
            write(&dir, broken, "not json");
            write(&dir, dup_a, &server_json("one", &[9]));
            write(&dir, dup_b, &server_json("two", &[9]));

            let mut loader = loader_in(root.path());
            assert_eq!(loader.load_config_files(), LoadStatus::Error);
            assert_eq!(loader.servers().len(), 2);
        }
    }

    #[test]
    fn test_missing_dir_is_created_without_scan() {
        let root = tempfile::tempdir().unwrap();
        let mut loader = ConfigLoader::with_parts(
            root.path().join(CONFIG_DIR),
            Box::new(FakeProbe::ok()),
            Box::new(PanickingScanner),
        );

        assert_eq!(loader.load_config_files(), LoadStatus::Success);
        assert!(loader.config_dir().is_dir());
        assert!(loader.servers().is_empty());
    }

    #[test]
    fn test_created_dir_reloads_empty() {
        let root = tempfile::tempdir().unwrap();
        let mut loader = loader_in(root.path());

        assert_eq!(loader.load_config_files(), LoadStatus::Success);
        assert_eq!(loader.load_config_files(), LoadStatus::Success);
        assert!(loader.servers().is_empty());
    }

    #[test]
    fn test_missing_dir_on_read_only_storage() {
        let root = tempfile::tempdir().unwrap();
        let probe = FakeProbe {
            writable: false,
            ..FakeProbe::ok()
        };
        let mut loader = ConfigLoader::with_parts(
            root.path().join(CONFIG_DIR),
            Box::new(probe),
            Box::new(PanickingScanner),
        );

        assert_eq!(loader.load_config_files(), LoadStatus::CannotCreateConfigDir);
        assert!(!loader.config_dir().exists());
    }

    #[test]
    fn test_config_path_is_a_file() {
        let root = tempfile::tempdir().unwrap();
        // A regular file squatting on the directory name cannot be replaced
        write(root.path(), CONFIG_DIR, "");

        let mut loader = loader_in(root.path());
        assert_eq!(loader.load_config_files(), LoadStatus::CannotCreateConfigDir);
    }

    #[test]
    fn test_unreadable_storage_short_circuits() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        write(&dir, "a.json", &server_json("alpha", &[1]));

        let mut loader = loader_in(root.path());
        assert_eq!(loader.load_config_files(), LoadStatus::Success);

        let calls = Arc::new(AtomicUsize::new(0));
        loader.probe = Box::new(FakeProbe {
            readable: false,
            calls: calls.clone(),
            ..FakeProbe::ok()
        });
        loader.scanner = Box::new(PanickingScanner);

        assert_eq!(loader.load_config_files(), LoadStatus::CannotReadExternalStorage);
        // Only the readability check ran
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // State from the previous load is left untouched
        assert_eq!(names(&loader), vec!["alpha"]);
    }

    #[test]
    fn test_unreadable_storage_on_fresh_loader() {
        let root = tempfile::tempdir().unwrap();
        let probe = FakeProbe {
            readable: false,
            permission: false,
            ..FakeProbe::ok()
        };
        let mut loader = ConfigLoader::with_parts(
            root.path().join(CONFIG_DIR),
            Box::new(probe),
            Box::new(PanickingScanner),
        );

        assert_eq!(loader.load_config_files(), LoadStatus::CannotReadExternalStorage);
        assert!(loader.servers().is_empty());
        assert!(!loader.config_dir().exists());
    }

    #[test]
    fn test_permission_denied() {
        let root = tempfile::tempdir().unwrap();
        let probe = FakeProbe {
            permission: false,
            ..FakeProbe::ok()
        };
        let mut loader = ConfigLoader::with_parts(
            root.path().join(CONFIG_DIR),
            Box::new(probe),
            Box::new(PanickingScanner),
        );

        assert_eq!(loader.load_config_files(), LoadStatus::PermissionDenied);
        assert!(!loader.config_dir().exists());
    }

    #[test]
    fn test_scanner_failure_is_error() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join(CONFIG_DIR)).unwrap();
        let mut loader = ConfigLoader::with_parts(
            root.path().join(CONFIG_DIR),
            Box::new(FakeProbe::ok()),
            Box::new(FailingScanner),
        );

        assert_eq!(loader.load_config_files(), LoadStatus::Error);
        assert!(loader.servers().is_empty());
    }

    #[test]
    fn test_reload_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        write(&dir, "a.json", &server_json("alpha", &[1, 2]));
        write(&dir, "b.json", &server_json("bravo", &[3]));

        let mut loader = loader_in(root.path());
        let first_status = loader.load_config_files();
        let first_servers = loader.servers().to_vec();

        let second_status = loader.load_config_files();
        assert_eq!(first_status, LoadStatus::Success);
        assert_eq!(second_status, first_status);
        assert_eq!(loader.servers(), first_servers.as_slice());
        assert_eq!(loader.servers()[0].commands, first_servers[0].commands);
    }

    #[test]
    fn test_reload_drops_removed_commands() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        write(&dir, "a.json", &server_json("alpha", &[1]));

        let mut loader = loader_in(root.path());
        loader.load_config_files();
        assert!(loader.command_by_id(1).is_some());

        fs::remove_file(dir.join("a.json")).unwrap();
        assert_eq!(loader.load_config_files(), LoadStatus::Success);
        assert!(loader.command_by_id(1).is_none());
        assert!(loader.servers().is_empty());
    }

    #[test]
    fn test_other_extensions_are_ignored() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir(&dir).unwrap();
        write(&dir, "a.Json", "garbage");
        write(&dir, "b.txt", "garbage");
        write(&dir, "c.json", &server_json("charlie", &[]));

        let mut loader = loader_in(root.path());
        assert_eq!(loader.load_config_files(), LoadStatus::Success);
        assert_eq!(names(&loader), vec!["charlie"]);
    }

    #[test]
    fn test_new_uses_named_subdirectory() {
        let root = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(root.path());
        assert_eq!(loader.config_dir(), root.path().join(CONFIG_DIR));
    }

    #[test]
    fn test_status_messages() {
        assert!(LoadStatus::Success.is_success());
        assert!(!LoadStatus::AmbiguousId.is_success());
        assert_eq!(LoadStatus::Error.to_string(), LoadStatus::Error.message());
    }
}
