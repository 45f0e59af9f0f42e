// ClipGlow - Modele du menu contextuel de la zone de notification
//
// Ce module decrit le menu independamment de Win32 :
// - `MenuCommand` : commandes et leur identifiant numerique (WM_COMMAND)
// - `build_menu`  : arbre d'elements (titre, sous-menus, coches) a partir
//                   des preferences courantes
// - `MenuCommand::apply` : effet d'une commande sur `Settings` et action
//                   complementaire a realiser par l'application
//
// # Identifiants
// Les commandes fixes utilisent 1..=10 ; les styles 100 + index ; les
// tailles 200 + taille en pixels.
//
// # Structure du menu
// ClipGlow (titre desactive)
// Icon style >  14 styles (coche unique) / Import custom icon... / Clear custom icon
// Icon size  >  20 24 28 32 40 48
// Copy animation / Tray flash / Start with Windows / Automatic updates (coches)
// Check for updates... / About / Exit

use crate::config::Settings;
use crate::constants::{APP_NAME, ICON_SIZE_CHOICES};
use crate::icon::IconStyle;
use std::path::PathBuf;

/// ID du menu contextuel : importer une icone
const TRAY_CMD_IMPORT_ICON: u16 = 1;
/// ID du menu contextuel : oublier l'icone personnalisee
const TRAY_CMD_CLEAR_ICON: u16 = 2;
/// ID du menu contextuel : animation de copie
const TRAY_CMD_FEEDBACK: u16 = 3;
/// ID du menu contextuel : clignotement du tray
const TRAY_CMD_FLASH: u16 = 4;
/// ID du menu contextuel : demarrage automatique
const TRAY_CMD_STARTUP: u16 = 5;
/// ID du menu contextuel : mises a jour automatiques
const TRAY_CMD_AUTO_UPDATE: u16 = 6;
/// ID du menu contextuel : verifier les mises a jour
const TRAY_CMD_CHECK_UPDATE: u16 = 7;
/// ID du menu contextuel : a propos
const TRAY_CMD_ABOUT: u16 = 8;
/// ID du menu contextuel : quitter
const TRAY_CMD_QUIT: u16 = 9;
/// Base des IDs de style
const TRAY_CMD_STYLE_BASE: u16 = 100;
/// Base des IDs de taille
const TRAY_CMD_SIZE_BASE: u16 = 200;

/// Commande du menu contextuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    SelectStyle(IconStyle),
    ImportCustomIcon,
    ClearCustomIcon,
    SetSize(u32),
    ToggleFeedback,
    ToggleFlash,
    ToggleAutoStart,
    ToggleAutoUpdate,
    CheckUpdates,
    About,
    Exit,
}

/// Action a realiser par l'application apres une commande.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    None,
    /// Style, taille ou image modifies : recalculer l'icone
    IconChanged,
    /// Appliquer le nouvel etat au registre
    AutoStartChanged(bool),
    /// Demarrer ou arreter la verification periodique
    AutoUpdateChanged(bool),
    /// Ouvrir le selecteur de fichier
    PickCustomIcon,
    CheckUpdates,
    ShowAbout,
    Exit,
}

impl MenuCommand {
    /// Identifiant numerique passe a AppendMenuW.
    pub fn id(self) -> u16 {
        match self {
            MenuCommand::SelectStyle(style) => TRAY_CMD_STYLE_BASE + style.index() as u16,
            MenuCommand::SetSize(size) => TRAY_CMD_SIZE_BASE + size.min(99) as u16,
            MenuCommand::ImportCustomIcon => TRAY_CMD_IMPORT_ICON,
            MenuCommand::ClearCustomIcon => TRAY_CMD_CLEAR_ICON,
            MenuCommand::ToggleFeedback => TRAY_CMD_FEEDBACK,
            MenuCommand::ToggleFlash => TRAY_CMD_FLASH,
            MenuCommand::ToggleAutoStart => TRAY_CMD_STARTUP,
            MenuCommand::ToggleAutoUpdate => TRAY_CMD_AUTO_UPDATE,
            MenuCommand::CheckUpdates => TRAY_CMD_CHECK_UPDATE,
            MenuCommand::About => TRAY_CMD_ABOUT,
            MenuCommand::Exit => TRAY_CMD_QUIT,
        }
    }

    /// Commande associee a un identifiant (0 = menu annule).
    pub fn from_id(id: u16) -> Option<Self> {
        match id {
            TRAY_CMD_IMPORT_ICON => Some(MenuCommand::ImportCustomIcon),
            TRAY_CMD_CLEAR_ICON => Some(MenuCommand::ClearCustomIcon),
            TRAY_CMD_FEEDBACK => Some(MenuCommand::ToggleFeedback),
            TRAY_CMD_FLASH => Some(MenuCommand::ToggleFlash),
            TRAY_CMD_STARTUP => Some(MenuCommand::ToggleAutoStart),
            TRAY_CMD_AUTO_UPDATE => Some(MenuCommand::ToggleAutoUpdate),
            TRAY_CMD_CHECK_UPDATE => Some(MenuCommand::CheckUpdates),
            TRAY_CMD_ABOUT => Some(MenuCommand::About),
            TRAY_CMD_QUIT => Some(MenuCommand::Exit),
            id if (TRAY_CMD_STYLE_BASE..TRAY_CMD_SIZE_BASE).contains(&id) => IconStyle::ALL
                .get((id - TRAY_CMD_STYLE_BASE) as usize)
                .map(|s| MenuCommand::SelectStyle(*s)),
            id if id >= TRAY_CMD_SIZE_BASE => {
                let size = (id - TRAY_CMD_SIZE_BASE) as u32;
                ICON_SIZE_CHOICES
                    .contains(&size)
                    .then_some(MenuCommand::SetSize(size))
            }
            _ => None,
        }
    }

    /// Vrai si la commande modifie les preferences (et doit etre persistee).
    pub fn mutates_settings(self) -> bool {
        !matches!(
            self,
            MenuCommand::ImportCustomIcon
                | MenuCommand::CheckUpdates
                | MenuCommand::About
                | MenuCommand::Exit
        )
    }

    /// Applique la commande aux preferences.
    pub fn apply(self, settings: &mut Settings) -> Followup {
        match self {
            MenuCommand::SelectStyle(style) => {
                settings.icon_style = style;
                settings.custom_icon_path = None;
                Followup::IconChanged
            }
            MenuCommand::ClearCustomIcon => {
                settings.custom_icon_path = None;
                Followup::IconChanged
            }
            MenuCommand::SetSize(size) => {
                settings.icon_size = size;
                Followup::IconChanged
            }
            MenuCommand::ToggleFeedback => {
                settings.enable_icon_feedback = !settings.enable_icon_feedback;
                Followup::None
            }
            MenuCommand::ToggleFlash => {
                settings.enable_tray_flash = !settings.enable_tray_flash;
                Followup::None
            }
            MenuCommand::ToggleAutoStart => {
                settings.enable_auto_start = !settings.enable_auto_start;
                Followup::AutoStartChanged(settings.enable_auto_start)
            }
            MenuCommand::ToggleAutoUpdate => {
                settings.enable_auto_update = !settings.enable_auto_update;
                Followup::AutoUpdateChanged(settings.enable_auto_update)
            }
            MenuCommand::ImportCustomIcon => Followup::PickCustomIcon,
            MenuCommand::CheckUpdates => Followup::CheckUpdates,
            MenuCommand::About => Followup::ShowAbout,
            MenuCommand::Exit => Followup::Exit,
        }
    }
}

/// Enregistre une icone personnalisee deja validee.
pub fn apply_custom_icon(settings: &mut Settings, path: PathBuf) -> Followup {
    settings.custom_icon_path = Some(path);
    Followup::IconChanged
}

/// Element du menu contextuel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// Libelle desactive
    Title(String),
    Separator,
    Command {
        label: String,
        command: MenuCommand,
        checked: bool,
    },
    Submenu {
        label: String,
        items: Vec<MenuItem>,
    },
}

fn command(label: &str, command: MenuCommand, checked: bool) -> MenuItem {
    MenuItem::Command {
        label: label.to_string(),
        command,
        checked,
    }
}

/// Construit le menu a partir des preferences courantes.
pub fn build_menu(settings: &Settings) -> Vec<MenuItem> {
    let has_custom = settings.custom_icon_path.is_some();

    let mut styles: Vec<MenuItem> = IconStyle::ALL
        .iter()
        .map(|&style| {
            command(
                style.display_name(),
                MenuCommand::SelectStyle(style),
                settings.icon_style == style,
            )
        })
        .collect();
    styles.push(MenuItem::Separator);
    styles.push(command("Import custom icon...", MenuCommand::ImportCustomIcon, has_custom));
    if has_custom {
        styles.push(command("Clear custom icon", MenuCommand::ClearCustomIcon, false));
    }

    let sizes = ICON_SIZE_CHOICES
        .iter()
        .map(|&size| {
            command(
                &format!("{} px", size),
                MenuCommand::SetSize(size),
                settings.icon_size == size,
            )
        })
        .collect();

    vec![
        MenuItem::Title(APP_NAME.to_string()),
        MenuItem::Separator,
        MenuItem::Submenu { label: "Icon style".into(), items: styles },
        MenuItem::Submenu { label: "Icon size".into(), items: sizes },
        MenuItem::Separator,
        command("Copy animation", MenuCommand::ToggleFeedback, settings.enable_icon_feedback),
        command("Tray flash", MenuCommand::ToggleFlash, settings.enable_tray_flash),
        command("Start with Windows", MenuCommand::ToggleAutoStart, settings.enable_auto_start),
        command("Automatic updates", MenuCommand::ToggleAutoUpdate, settings.enable_auto_update),
        MenuItem::Separator,
        command("Check for updates...", MenuCommand::CheckUpdates, false),
        command("About", MenuCommand::About, false),
        MenuItem::Separator,
        command("Exit", MenuCommand::Exit, false),
    ]
}
