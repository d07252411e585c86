use crate::idm::IdentityMgr;
use crate::types::User;

use super::{StoreArgs, open_idm, parse_id, print_json};

fn print_user(user: &User) {
    let admin = if user.is_admin() { "\tadmin" } else { "" };
    println!("{}\t{}\t{}{admin}", user.uid(), user.gid(), user.name());
}

pub fn run_user_add(store: &StoreArgs, name: &str, group: &str) -> anyhow::Result<()> {
    let idm = open_idm(store)?;
    let user = idm.user_add(name, group)?;
    idm.close()?;

    println!(
        "Created user \"{}\" (uid {}) in group \"{}\" (gid {})",
        user.name(),
        user.uid(),
        group,
        user.gid()
    );
    Ok(())
}

pub fn run_user_del(store: &StoreArgs, name: &str) -> anyhow::Result<()> {
    let idm = open_idm(store)?;
    idm.user_del(name)?;
    idm.close()?;

    println!("Deleted user \"{name}\"");
    Ok(())
}

pub fn run_user_show(
    store: &StoreArgs,
    user: &str,
    by_id: bool,
    json: bool,
) -> anyhow::Result<()> {
    let idm = open_idm(store)?;
    let user = if by_id {
        idm.lookup_user_id(parse_id(user)?)?
    } else {
        idm.lookup_user(user)?
    };
    idm.close()?;

    if json {
        return print_json(&user);
    }
    print_user(&user);
    Ok(())
}

pub fn run_user_list(store: &StoreArgs, json: bool) -> anyhow::Result<()> {
    let idm = open_idm(store)?;
    let users = idm.users()?;
    idm.close()?;

    if json {
        return print_json(&users);
    }
    for user in &users {
        print_user(user);
    }
    Ok(())
}
