//! Seeded directory and coordinator shared by workflow tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Arc;

use helpdesk_core::{IdentityContext, Role, Ticket, TicketPriority, UserId};
use helpdesk_gateway::store::{InMemoryStore, NewUser, TicketStore};
use helpdesk_gateway::workflow::{CreateTicket, InputLimits, TicketWorkflowCoordinator};

pub const MANAGER: IdentityContext = IdentityContext { user_id: UserId(1), role: Role::Manager };
pub const SUPPORT_X: IdentityContext = IdentityContext { user_id: UserId(2), role: Role::Support };
pub const USER_A: IdentityContext = IdentityContext { user_id: UserId(3), role: Role::User };
pub const SUPPORT_Y: IdentityContext = IdentityContext { user_id: UserId(4), role: Role::Support };
pub const USER_B: IdentityContext = IdentityContext { user_id: UserId(5), role: Role::User };

pub const EVERYONE: [IdentityContext; 5] = [MANAGER, SUPPORT_X, USER_A, SUPPORT_Y, USER_B];

pub async fn seed(store: &dyn TicketStore) {
    for who in EVERYONE {
        store
            .insert_user(NewUser {
                id: who.user_id,
                name: format!("user-{}", who.user_id),
                email: format!("u{}@example.com", who.user_id),
                role: who.role,
            })
            .await
            .unwrap();
    }
}

pub async fn coordinator_over(store: Arc<dyn TicketStore>) -> TicketWorkflowCoordinator {
    seed(store.as_ref()).await;
    TicketWorkflowCoordinator::new(store, InputLimits::default())
}

pub async fn coordinator() -> TicketWorkflowCoordinator {
    coordinator_over(Arc::new(InMemoryStore::new())).await
}

pub async fn open_ticket(wf: &TicketWorkflowCoordinator, by: &IdentityContext, title: &str) -> Ticket {
    wf.create_ticket(
        by,
        CreateTicket {
            title: title.into(),
            description: "details".into(),
            priority: TicketPriority::Medium,
        },
    )
    .await
    .unwrap()
}
