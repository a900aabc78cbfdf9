// Author Dustin Pilgrim
// License: MIT

/// Rendered into `<workdir>/vagrant/Vagrantfile`. Four substitution points:
/// box name, synced workspace folder, salt file roots, minion config.
const VAGRANTFILE: &str = r#"# -*- mode: ruby -*-
# vi: set ft=ruby :

Vagrant.configure(2) do |config|
  config.vm.box = "%BOX%"

  # Boxes are registered locally by devm; never check upstream.
  config.vm.box_check_update = false

  config.vm.network :private_network, ip: "10.11.12.13"

  config.vm.synced_folder "%WORKSPACE%", "/workspace/"
  config.vm.synced_folder "%SALT_ROOTS%", "/srv/salt/"

  config.vm.provider "virtualbox" do |vb|
    vb.gui = false
    vb.memory = "2048"
    vb.name = "%BOX%"
  end

  config.vm.provision :salt do |salt|
    salt.minion_config = "%MINION_CONFIG%"
    salt.run_highstate = true
  end
end
"#;

pub fn render(box_name: &str, workspace: &str, salt_roots: &str, minion_config: &str) -> String {
    VAGRANTFILE
        .replace("%BOX%", box_name)
        .replace("%WORKSPACE%", workspace)
        .replace("%SALT_ROOTS%", salt_roots)
        .replace("%MINION_CONFIG%", minion_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_all_four_points() {
        let out = render(
            "devm-box",
            "/home/u/dev",
            "/home/u/.config/devm/salt/roots",
            "/home/u/.config/devm/salt/minion",
        );

        assert!(out.contains(r#"config.vm.box = "devm-box""#));
        assert!(out.contains(r#"config.vm.synced_folder "/home/u/dev", "/workspace/""#));
        assert!(out.contains(r#""/home/u/.config/devm/salt/roots", "/srv/salt/""#));
        assert!(out.contains(r#"salt.minion_config = "/home/u/.config/devm/salt/minion""#));
    }

    #[test]
    fn leaves_no_markers_behind() {
        let out = render("b", "w", "r", "m");
        assert!(!out.contains('%'));
    }
}
